use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoginScreenProps {
    pub on_login: Callback<String>,
    pub signing_in: bool,
    pub error: Option<String>,
}

#[function_component(LoginScreen)]
pub fn login_screen(props: &LoginScreenProps) -> Html {
    let access_key = use_state(String::new);

    let on_input = {
        let access_key = access_key.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            access_key.set(input.value());
        })
    };

    let on_submit = {
        let access_key = access_key.clone();
        let on_login = props.on_login.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if !access_key.trim().is_empty() {
                on_login.emit((*access_key).clone());
            }
        })
    };

    html! {
        <div class="login-screen">
            <form class="login-card" onsubmit={on_submit}>
                <h1>{"Stock Calculation Sheet"}</h1>
                <p>{"Sign in to view and record daily stock."}</p>

                {if let Some(error) = props.error.as_ref() {
                    html! { <div class="form-message error">{error}</div> }
                } else { html! {} }}

                <div class="form-group">
                    <label for="access-key">{"Access key"}</label>
                    <input
                        id="access-key"
                        type="password"
                        autocomplete="current-password"
                        value={(*access_key).clone()}
                        oninput={on_input}
                        disabled={props.signing_in}
                    />
                </div>

                <button type="submit" class="btn btn-primary" disabled={props.signing_in || access_key.trim().is_empty()}>
                    {if props.signing_in { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
