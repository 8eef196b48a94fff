use super::display::{
    customer_cells, filter_value, parse_filter_value, segment_badge_style, CustomerCells,
};
use super::state::DashboardState;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::TableCellMoney;
use contracts::dashboards::d410_segmentation::CustomerRow;
use contracts::enums::Segment;
use leptos::prelude::*;
use thaw::*;

/// Paged customer table with the segment filter.
///
/// A failed page load shows up as an empty table, never as an error banner.
#[component]
pub fn CustomerTable(state: DashboardState, segments: Vec<Segment>) -> impl IntoView {
    let customers = Memo::new(move |_| state.snapshot.with(|s| s.customers.clone()));
    let filter = move || state.inputs.with(|i| filter_value(i.segment));

    let on_previous = Callback::new(move |_: ()| {
        state.previous_page();
    });
    let on_next = Callback::new(move |_: ()| {
        state.next_page();
    });

    view! {
        <section class="d410-section">
            <div class="d410-section__header">
                <h2>"Clienti"</h2>
                <label class="d410-filter">
                    <span>"Segmento"</span>
                    <select
                        prop:value=filter
                        on:change=move |ev| {
                            state.set_segment_filter(parse_filter_value(&event_target_value(&ev)));
                        }
                    >
                        <option value="">"Tutti"</option>
                        {segments
                            .into_iter()
                            .map(|segment| {
                                view! { <option value=segment.code()>{segment.code()}</option> }
                            })
                            .collect_view()}
                    </select>
                </label>
            </div>

            <div class="d410-table-wrapper">
                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"#"</TableHeaderCell>
                            <TableHeaderCell>"Cliente"</TableHeaderCell>
                            <TableHeaderCell>"Segmento"</TableHeaderCell>
                            <TableHeaderCell>"Arrivo"</TableHeaderCell>
                            <TableHeaderCell>"Notti"</TableHeaderCell>
                            <TableHeaderCell>"Ospiti"</TableHeaderCell>
                            <TableHeaderCell>"Canale"</TableHeaderCell>
                            <TableHeaderCell>"Giorno"</TableHeaderCell>
                            <TableHeaderCell>"Storico"</TableHeaderCell>
                            <TableHeaderCell>"Spesa media"</TableHeaderCell>
                            <TableHeaderCell>"Revenue"</TableHeaderCell>
                            <TableHeaderCell>"Score B/L/C/F/P"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            customers
                                .get()
                                .data
                                .unwrap_or_default()
                                .into_iter()
                                .map(|row| view! { <CustomerRowView row=row /> })
                                .collect_view()
                        }}
                    </TableBody>
                </Table>
                {move || {
                    customers.with(|c| c.loading).then(|| {
                        view! {
                            <div class="d410-table-loading">
                                <Spinner size=SpinnerSize::Small />
                            </div>
                        }
                    })
                }}
            </div>

            <PaginationControls
                current_page=state.page()
                has_next=state.has_next_page()
                on_previous=on_previous
                on_next=on_next
            />
        </section>
    }
}

#[component]
fn CustomerRowView(row: CustomerRow) -> impl IntoView {
    // Дети TableCell - move-замыкания, поэтому в view! только готовые значения
    let CustomerCells {
        number,
        name,
        segment,
        arrival,
        nights,
        guests,
        channel,
        weekday,
        history,
        spesa_media,
        revenue,
        scores,
    } = customer_cells(&row);
    let badge = segment_badge_style(segment, "30");
    let code = segment.code();

    view! {
        <TableRow>
            <TableCell class="text-right">{number}</TableCell>
            <TableCell>
                <strong>{name}</strong>
            </TableCell>
            <TableCell>
                <span class="d410-badge" style=badge>{code}</span>
            </TableCell>
            <TableCell>{arrival}</TableCell>
            <TableCell class="text-right">{nights}</TableCell>
            <TableCell class="text-right">{guests}</TableCell>
            <TableCell>{channel}</TableCell>
            <TableCell>{weekday}</TableCell>
            <TableCell class="text-right">{history}</TableCell>
            <TableCellMoney value=spesa_media />
            <TableCellMoney value=revenue />
            <TableCell class="d410-mono">{scores}</TableCell>
        </TableRow>
    }
}
