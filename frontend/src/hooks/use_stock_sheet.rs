use std::cell::RefCell;
use std::rc::Rc;

use shared::{calculate_totals, export_file_name, render_csv, DateKey, SheetDefaults};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils::today_key;
use crate::services::download::{download_text, print_page};
use crate::services::logging::Logger;
use crate::services::snapshot_store::{LoadSource, SnapshotStore, StoreError};
use crate::state::{EditAction, SheetOrigin, SheetSession};

const COMPONENT: &str = "stock_sheet";

#[derive(Clone)]
pub struct UseStockSheetHandle {
    /// Owned by the page; read it while rendering
    pub session: Rc<RefCell<SheetSession>>,
    pub saved_dates: Vec<String>,
    pub on_select_date: Callback<String>,
    pub on_edit: Callback<EditAction>,
    pub on_save: Callback<()>,
    pub on_dismiss_error: Callback<()>,
    pub on_export: Callback<()>,
    pub on_print: Callback<()>,
}

/// Sheet session for the selected date, wired to the snapshot store.
#[hook]
pub fn use_stock_sheet(
    api_client: ApiClient,
    defaults: SheetDefaults,
    on_unauthorized: Callback<()>,
) -> UseStockSheetHandle {
    let session = use_mut_ref({
        let defaults = defaults.clone();
        move || SheetSession::new(defaults)
    });
    let force_update = use_force_update();
    let saved_dates = use_state(Vec::<String>::new);
    let store = SnapshotStore::new(api_client, defaults);

    let refresh_dates = {
        let store = store.clone();
        let saved_dates = saved_dates.clone();
        let on_unauthorized = on_unauthorized.clone();
        Callback::from(move |_: ()| {
            let store = store.clone();
            let saved_dates = saved_dates.clone();
            let on_unauthorized = on_unauthorized.clone();
            spawn_local(async move {
                match store.list_snapshot_dates().await {
                    Ok(dates) => saved_dates.set(dates),
                    Err(StoreError::Unauthorized) => on_unauthorized.emit(()),
                    Err(e) => Logger::warn_with_component(COMPONENT, &format!("Failed to list saved dates: {}", e)),
                }
            });
        })
    };

    let start_load = {
        let store = store.clone();
        let session = session.clone();
        let force_update = force_update.clone();
        let on_unauthorized = on_unauthorized.clone();
        Callback::from(move |date: DateKey| {
            let ticket = session.borrow_mut().select_date(date);
            force_update.force_update();

            let store = store.clone();
            let session = session.clone();
            let force_update = force_update.clone();
            let on_unauthorized = on_unauthorized.clone();
            spawn_local(async move {
                let outcome = store.load_snapshot(&ticket.date).await;
                let origin = match &outcome.source {
                    LoadSource::Stored => SheetOrigin::Stored,
                    LoadSource::Defaults => SheetOrigin::Defaults,
                    LoadSource::Degraded(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Failed to load snapshot for {}, showing defaults: {}", ticket.date, e),
                        );
                        if *e == StoreError::Unauthorized {
                            on_unauthorized.emit(());
                        }
                        SheetOrigin::Defaults
                    }
                };

                let applied = session.borrow_mut().complete_load(&ticket, outcome.sheet, origin);
                if applied {
                    force_update.force_update();
                } else {
                    gloo::console::debug!(format!("Discarded stale load for {}", ticket.date));
                }
            });
        })
    };

    // Open today's sheet on mount
    use_effect_with((), {
        let start_load = start_load.clone();
        let refresh_dates = refresh_dates.clone();
        move |_| {
            match today_key() {
                Some(today) => start_load.emit(today),
                None => Logger::error_with_component(COMPONENT, "Could not determine today's date"),
            }
            refresh_dates.emit(());
            || ()
        }
    });

    let on_select_date = Callback::from(move |value: String| match DateKey::parse(&value) {
        Ok(date) => start_load.emit(date),
        Err(e) => Logger::warn_with_component(COMPONENT, &e.to_string()),
    });

    let on_edit = {
        let session = session.clone();
        let force_update = force_update.clone();
        Callback::from(move |action: EditAction| {
            if let Err(e) = session.borrow_mut().edit(action) {
                Logger::warn_with_component(COMPONENT, &e.to_string());
            }
            force_update.force_update();
        })
    };

    let on_save = {
        let session = session.clone();
        let force_update = force_update.clone();
        let store = store.clone();
        Callback::from(move |_| {
            let Some(ticket) = session.borrow_mut().begin_save() else {
                return;
            };
            force_update.force_update();

            let session = session.clone();
            let force_update = force_update.clone();
            let store = store.clone();
            let on_unauthorized = on_unauthorized.clone();
            let refresh_dates = refresh_dates.clone();
            spawn_local(async move {
                let result = store.save_snapshot(&ticket.date, &ticket.sheet).await;
                match &result {
                    Ok(()) => Logger::info_with_component(COMPONENT, &format!("Saved snapshot for {}", ticket.date)),
                    Err(StoreError::Unauthorized) => on_unauthorized.emit(()),
                    Err(e) => Logger::error_with_component(COMPONENT, &format!("Save failed for {}: {}", ticket.date, e)),
                }

                let saved = result.is_ok();
                let applied = session
                    .borrow_mut()
                    .complete_save(&ticket, result.map_err(|e| e.to_string()));
                if applied {
                    force_update.force_update();
                }
                if saved {
                    refresh_dates.emit(());
                }
            });
        })
    };

    let on_dismiss_error = {
        let session = session.clone();
        let force_update = force_update.clone();
        Callback::from(move |_| {
            session.borrow_mut().dismiss_error();
            force_update.force_update();
        })
    };

    let on_export = {
        let session = session.clone();
        let force_update = force_update.clone();
        Callback::from(move |_| {
            let (date, sheet) = {
                let mut session = session.borrow_mut();
                let date = session.selected_date().cloned();
                (date, session.flushed_sheet())
            };
            force_update.force_update();

            let Some(date) = date else {
                return;
            };
            let csv = render_csv(&sheet, &calculate_totals(&sheet), &date);
            if let Err(e) = download_text(&export_file_name(&date), "text/csv;charset=utf-8", &csv) {
                Logger::error_with_component(COMPONENT, &format!("Export failed: {}", e));
            }
        })
    };

    let on_print = Callback::from(|_| {
        if let Err(e) = print_page() {
            Logger::error_with_component(COMPONENT, &e);
        }
    });

    UseStockSheetHandle {
        session,
        saved_dates: (*saved_dates).clone(),
        on_select_date,
        on_edit,
        on_save,
        on_dismiss_error,
        on_export,
        on_print,
    }
}
