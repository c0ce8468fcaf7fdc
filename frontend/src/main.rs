use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod services;
mod state;

use components::login_screen::LoginScreen;
use components::stock_sheet_page::StockSheetPage;
use config::AppConfig;
use hooks::use_auth::use_auth;
use services::api::ApiClient;

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| AppConfig::default());
    let base_client = use_memo(config.clone(), |config| ApiClient::new(config.api_base_url.clone()));
    let auth = use_auth((*base_client).clone());

    if auth.state.checking {
        return html! {
            <div class="login-screen">
                <span class="spinner" aria-label="Checking session"></span>
            </div>
        };
    }

    match auth.state.token.clone() {
        Some(token) => {
            let api_client = base_client.with_token(Some(token.clone()));
            html! {
                // Keyed by token so a new session starts from a fresh sheet
                <StockSheetPage
                    key={token}
                    api_client={api_client}
                    config={(*config).clone()}
                    on_logout={auth.logout.clone()}
                    on_unauthorized={auth.expire.clone()}
                />
            }
        }
        None => html! {
            <LoginScreen
                on_login={auth.login.clone()}
                signing_in={auth.state.signing_in}
                error={auth.state.error.clone()}
            />
        },
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
