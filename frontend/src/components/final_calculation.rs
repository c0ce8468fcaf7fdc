use shared::{format_number, SheetTotals};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FinalCalculationProps {
    pub totals: SheetTotals,
}

#[function_component(FinalCalculation)]
pub fn final_calculation(props: &FinalCalculationProps) -> Html {
    let totals = props.totals;
    let lines = [
        ("Opening Stock", "+", totals.opening),
        ("Purchase", "+", totals.purchase),
        ("Sales", "−", totals.sales),
        ("Suspense", "−", totals.suspense),
    ];

    html! {
        <section class="sheet-card final-calculation">
            <h2>{"Final Calculation"}</h2>
            <table class="sheet-table">
                <tbody>
                    {for lines.iter().map(|(label, sign, value)| html! {
                        <tr>
                            <td>{*label}</td>
                            <td class="sign">{*sign}</td>
                            <td>{format_number(*value)}</td>
                        </tr>
                    })}
                </tbody>
                <tfoot>
                    <tr class="closing-stock-row">
                        <td>{"Closing Stock"}</td>
                        <td class="sign">{"="}</td>
                        <td>{format_number(totals.closing)}</td>
                    </tr>
                </tfoot>
            </table>
        </section>
    }
}
