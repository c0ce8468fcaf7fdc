use shared::DateKey;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::user_menu::UserMenu;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub selected_date: Option<DateKey>,
    pub saved_count: usize,
    pub busy: bool,
    pub loading: bool,
    pub saving: bool,
    pub on_select_date: Callback<String>,
    pub on_save: Callback<()>,
    pub on_export: Callback<()>,
    pub on_print: Callback<()>,
    pub on_logout: Callback<()>,
}

/// Counter text for the header; hidden until something has been saved.
fn saved_count_label(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("1 saved date".to_string()),
        n => Some(format!("{} saved dates", n)),
    }
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let on_date_change = {
        let on_select_date = props.on_select_date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_select_date.emit(input.value());
        })
    };
    let on_save = props.on_save.reform(|_: MouseEvent| ());
    let on_export = props.on_export.reform(|_: MouseEvent| ());
    let on_print = props.on_print.reform(|_: MouseEvent| ());

    html! {
        <header class="header">
            <div class="container">
                <div class="header-left">
                    <h1>{"Stock Calculation Sheet"}</h1>
                    <span class="header-date">
                        {props.selected_date.as_ref().map(DateKey::display_long).unwrap_or_default()}
                    </span>
                </div>
                <div class="header-right">
                    <input
                        type="date"
                        class="date-picker no-print"
                        value={props.selected_date.as_ref().map(|d| d.to_string()).unwrap_or_default()}
                        onchange={on_date_change}
                        disabled={props.loading}
                    />
                    {if let Some(label) = saved_count_label(props.saved_count) {
                        html! { <span class="saved-count">{label}</span> }
                    } else { html! {} }}
                    {if props.busy {
                        html! { <span class="spinner" aria-label="Working"></span> }
                    } else { html! {} }}
                    <div class="header-actions no-print">
                        <button class="btn btn-primary" onclick={on_save} disabled={props.busy}>
                            {if props.saving { "Saving..." } else { "Save" }}
                        </button>
                        <button class="btn btn-secondary" onclick={on_export} disabled={props.busy}>{"Export CSV"}</button>
                        <button class="btn btn-secondary" onclick={on_print}>{"Print"}</button>
                    </div>
                    <UserMenu on_logout={props.on_logout.clone()} />
                </div>
            </div>
        </header>
    }
}
