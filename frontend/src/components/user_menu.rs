use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct UserMenuProps {
    pub on_logout: Callback<()>,
}

#[function_component(UserMenu)]
pub fn user_menu(props: &UserMenuProps) -> Html {
    let is_open = use_state(|| false);

    let toggle_menu = {
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| is_open.set(!*is_open))
    };

    let on_backdrop_click = {
        let is_open = is_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            is_open.set(false);
        })
    };

    let on_logout_click = {
        let is_open = is_open.clone();
        let on_logout = props.on_logout.clone();
        Callback::from(move |_: MouseEvent| {
            is_open.set(false);
            on_logout.emit(());
        })
    };

    html! {
        <div class="user-menu no-print">
            <button class="btn btn-icon" title="Account" onclick={toggle_menu}>{"👤"}</button>
            {if *is_open {
                html! {
                    <>
                        <div class="menu-backdrop" onclick={on_backdrop_click}></div>
                        <div class="dropdown-menu">
                            <button class="dropdown-item" onclick={on_logout_click}>{"Log out"}</button>
                        </div>
                    </>
                }
            } else { html! {} }}
        </div>
    }
}
