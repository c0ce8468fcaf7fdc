use shared::Section;
use yew::prelude::*;

use super::editable_sheet_table::EditableSheetTable;
use super::final_calculation::FinalCalculation;
use super::header::Header;
use crate::config::AppConfig;
use crate::hooks::use_stock_sheet::use_stock_sheet;
use crate::services::api::ApiClient;
use crate::state::{SessionPhase, SheetOrigin};

#[derive(Properties, PartialEq)]
pub struct StockSheetPageProps {
    pub api_client: ApiClient,
    pub config: AppConfig,
    pub on_logout: Callback<()>,
    pub on_unauthorized: Callback<()>,
}

#[function_component(StockSheetPage)]
pub fn stock_sheet_page(props: &StockSheetPageProps) -> Html {
    let sheet = use_stock_sheet(
        props.api_client.clone(),
        props.config.sheet_defaults.clone(),
        props.on_unauthorized.clone(),
    );
    let session = sheet.session.borrow();
    let phase = session.phase();
    let totals = session.totals();
    let disabled = session.is_loading();

    let status = match phase {
        SessionPhase::Loading => Some("Loading sheet..."),
        SessionPhase::Loaded(SheetOrigin::Defaults) => Some("No saved sheet for this date. Starting from defaults."),
        _ => None,
    };

    html! {
        <div class="app">
            <Header
                selected_date={session.selected_date().cloned()}
                saved_count={sheet.saved_dates.len()}
                busy={session.is_busy()}
                loading={session.is_loading()}
                saving={phase == SessionPhase::Saving}
                on_select_date={sheet.on_select_date.clone()}
                on_save={sheet.on_save.clone()}
                on_export={sheet.on_export.clone()}
                on_print={sheet.on_print.clone()}
                on_logout={props.on_logout.clone()}
            />
            <main class="main">
                <div class="container">
                    {if let Some(error) = session.save_error() {
                        html! {
                            <div class="form-message error">
                                <span>{format!("Failed to save: {}", error)}</span>
                                <button class="btn btn-icon" onclick={sheet.on_dismiss_error.reform(|_: MouseEvent| ())}>
                                    {"✕"}
                                </button>
                            </div>
                        }
                    } else { html! {} }}

                    {if let Some(status) = status {
                        html! { <div class="form-message info no-print">{status}</div> }
                    } else { html! {} }}

                    <div class="sheet-grid">
                        {for Section::ALL.iter().map(|section| {
                            let editor = session.editor().section(*section);
                            html! {
                                <EditableSheetTable
                                    section={*section}
                                    rows={editor.rows().to_vec()}
                                    editing={editor.editing().cloned()}
                                    total={totals.section(*section)}
                                    disabled={disabled}
                                    on_action={sheet.on_edit.clone()}
                                />
                            }
                        })}
                    </div>

                    <FinalCalculation totals={totals} />
                </div>
            </main>
        </div>
    }
}
