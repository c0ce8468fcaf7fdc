use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::{clear_token, store_token, stored_token, ApiClient};
use crate::services::logging::Logger;

#[derive(Clone, PartialEq, Default)]
pub struct AuthState {
    pub token: Option<String>,
    /// Verifying a remembered token on startup
    pub checking: bool,
    pub signing_in: bool,
    pub error: Option<String>,
}

#[derive(Clone, PartialEq)]
pub struct UseAuthHandle {
    pub state: AuthState,
    pub login: Callback<String>,
    pub logout: Callback<()>,
    /// Drop the session locally after the server answered 401
    pub expire: Callback<()>,
}

/// Access-key sign-in with the token remembered in local storage.
#[hook]
pub fn use_auth(api_client: ApiClient) -> UseAuthHandle {
    let auth_state = use_state(|| AuthState {
        token: stored_token(),
        checking: stored_token().is_some(),
        ..AuthState::default()
    });

    // Check a remembered token once on mount
    use_effect_with((), {
        let auth_state = auth_state.clone();
        let api_client = api_client.clone();
        move |_| {
            if let Some(token) = (*auth_state).token.clone() {
                spawn_local(async move {
                    let authenticated = api_client
                        .with_token(Some(token.clone()))
                        .auth_status()
                        .await
                        .unwrap_or(false);
                    if authenticated {
                        auth_state.set(AuthState {
                            token: Some(token),
                            ..AuthState::default()
                        });
                    } else {
                        clear_token();
                        auth_state.set(AuthState::default());
                    }
                });
            }
            || ()
        }
    });

    let login = {
        let auth_state = auth_state.clone();
        let api_client = api_client.clone();
        Callback::from(move |access_key: String| {
            let auth_state = auth_state.clone();
            let api_client = api_client.clone();
            auth_state.set(AuthState {
                signing_in: true,
                ..AuthState::default()
            });
            spawn_local(async move {
                match api_client.login(&access_key).await {
                    Ok(response) => {
                        store_token(&response.token);
                        Logger::info_with_component("auth", &response.success_message);
                        auth_state.set(AuthState {
                            token: Some(response.token),
                            ..AuthState::default()
                        });
                    }
                    Err(e) => {
                        auth_state.set(AuthState {
                            error: Some(e),
                            ..AuthState::default()
                        });
                    }
                }
            });
        })
    };

    let logout = {
        let auth_state = auth_state.clone();
        let api_client = api_client.clone();
        Callback::from(move |_| {
            let client = api_client.with_token((*auth_state).token.clone());
            clear_token();
            auth_state.set(AuthState::default());
            spawn_local(async move {
                if let Err(e) = client.logout().await {
                    Logger::warn_with_component("auth", &format!("Logout request failed: {}", e));
                }
            });
        })
    };

    let expire = {
        let auth_state = auth_state.clone();
        Callback::from(move |_| {
            clear_token();
            auth_state.set(AuthState {
                error: Some("Your session has expired, please sign in again".to_string()),
                ..AuthState::default()
            });
        })
    };

    UseAuthHandle {
        state: (*auth_state).clone(),
        login,
        logout,
        expire,
    }
}
