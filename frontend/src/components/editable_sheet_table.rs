use shared::{format_number, is_valid_intermediate_input, Section, StockSheetRow};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::state::{EditAction, EditingCell};

#[derive(Properties, PartialEq)]
pub struct EditableSheetTableProps {
    pub section: Section,
    pub rows: Vec<StockSheetRow>,
    pub editing: Option<EditingCell>,
    pub total: f64,
    pub disabled: bool,
    pub on_action: Callback<EditAction>,
}

/// One section card: name/quantity rows, Add Row, and the section total.
#[function_component(EditableSheetTable)]
pub fn editable_sheet_table(props: &EditableSheetTableProps) -> Html {
    let section = props.section;
    let only_row = props.rows.len() == 1;

    let render_row = |(index, row): (usize, &StockSheetRow)| {
        let shown = match &props.editing {
            Some(cell) if cell.row == index => cell.buffer.clone(),
            _ => format_number(row.quantity),
        };

        let on_name_input = {
            let on_action = props.on_action.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                on_action.emit(EditAction::SetName { section, row: index, name: input.value() });
            })
        };

        let on_focus = {
            let on_action = props.on_action.clone();
            Callback::from(move |_: FocusEvent| {
                on_action.emit(EditAction::FocusQuantity { section, row: index });
            })
        };

        let on_quantity_input = {
            let on_action = props.on_action.clone();
            let shown = shown.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                let value = input.value();
                if is_valid_intermediate_input(&value) {
                    on_action.emit(EditAction::InputQuantity { section, value });
                } else {
                    // Rejected keystroke: put the previous buffer back
                    input.set_value(&shown);
                }
            })
        };

        let on_blur = {
            let on_action = props.on_action.clone();
            Callback::from(move |_: FocusEvent| {
                on_action.emit(EditAction::CommitQuantity { section });
            })
        };

        let on_keydown = {
            let on_action = props.on_action.clone();
            Callback::from(move |e: KeyboardEvent| {
                if e.key() == "Enter" {
                    e.prevent_default();
                    on_action.emit(EditAction::EnterQuantity { section });
                }
            })
        };

        let on_delete = {
            let on_action = props.on_action.clone();
            Callback::from(move |_: MouseEvent| {
                on_action.emit(EditAction::DeleteRow { section, row: index });
            })
        };

        html! {
            <tr key={index}>
                <td>
                    <input
                        type="text"
                        class="sheet-name-input"
                        placeholder={section.placeholder_name(index)}
                        value={row.name.clone()}
                        oninput={on_name_input}
                        disabled={props.disabled}
                    />
                </td>
                <td>
                    <input
                        type="text"
                        inputmode="decimal"
                        class="sheet-quantity-input"
                        placeholder="0.000"
                        value={shown}
                        onfocus={on_focus}
                        oninput={on_quantity_input}
                        onblur={on_blur}
                        onkeydown={on_keydown}
                        disabled={props.disabled}
                    />
                </td>
                <td class="no-print">
                    <button
                        class="btn btn-icon delete-row-btn"
                        title="Delete row"
                        onclick={on_delete}
                        disabled={props.disabled || only_row}
                    >
                        {"✕"}
                    </button>
                </td>
            </tr>
        }
    };

    let on_add_row = {
        let on_action = props.on_action.clone();
        Callback::from(move |_: MouseEvent| {
            on_action.emit(EditAction::AddRow { section });
        })
    };

    html! {
        <section class="sheet-card">
            <div class="sheet-card-header">
                <h2>{section.title()}</h2>
                <button class="btn btn-secondary no-print" onclick={on_add_row} disabled={props.disabled}>
                    {"+ Add Row"}
                </button>
            </div>
            <table class="sheet-table">
                <thead>
                    <tr>
                        <th>{section.name_label()}</th>
                        <th>{section.quantity_label()}</th>
                        <th class="no-print"></th>
                    </tr>
                </thead>
                <tbody>
                    {for props.rows.iter().enumerate().map(render_row)}
                </tbody>
                <tfoot>
                    <tr class="sheet-total-row">
                        <td>{section.total_label()}</td>
                        <td>{format_number(props.total)}</td>
                        <td class="no-print"></td>
                    </tr>
                </tfoot>
            </table>
        </section>
    }
}
