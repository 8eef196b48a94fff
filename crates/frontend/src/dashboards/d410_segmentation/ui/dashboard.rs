use super::customers::CustomerTable;
use super::display::{filter_options, segment_badge_style, segment_color, share_width};
use super::marketing::MarketingCards;
use super::state::{create_state, DashboardState};
use crate::dashboards::d410_segmentation::sync::{AnalysisId, OverviewBundle};
use crate::shared::components::stat_card::{StatCard, StatFormat};
use crate::shared::components::table::{format_money, format_number_with_decimals};
use crate::shared::icons::icon;
use contracts::dashboards::d410_segmentation::{Overview, SegmentStat};
use leptos::prelude::*;
use thaw::*;

/// Segmentation dashboard of one uploaded analysis
#[component]
pub fn SegmentationDashboard(
    /// Analysis to show; `None` renders the "no analysis" notice
    #[prop(into)]
    analysis_id: Signal<Option<AnalysisId>>,
) -> impl IntoView {
    let state = create_state();

    // Новый id -> контроллер сам сбрасывает фильтр и страницу
    Effect::new(move |_| {
        if let Some(id) = analysis_id.get() {
            state.open(id);
        }
    });

    let overview = Memo::new(move |_| state.snapshot.with(|s| s.overview.clone()));

    view! {
        <div id="d410_segmentation--dashboard" class="d410-dashboard">
            {move || {
                if analysis_id.with(|id| id.is_none()) {
                    return view! {
                        <div class="d410-error">
                            <p>"Nessuna analisi selezionata"</p>
                            <BackLink />
                        </div>
                    }.into_any();
                }

                let slice = overview.get();
                if slice.loading {
                    return view! {
                        <div class="d410-loading">
                            <Spinner />
                            <span>"Caricamento dashboard..."</span>
                        </div>
                    }.into_any();
                }

                match (slice.error, slice.data) {
                    (Some(err), _) => view! {
                        <div class="d410-error">
                            <p>{err}</p>
                            <BackLink />
                        </div>
                    }.into_any(),
                    (None, Some(bundle)) => render_dashboard(state, bundle).into_any(),
                    (None, None) => view! { <></> }.into_any(),
                }
            }}
        </div>
    }
}

fn render_dashboard(state: DashboardState, bundle: OverviewBundle) -> impl IntoView {
    let segments = filter_options(Some(&bundle.overview));
    let OverviewBundle { overview, marketing } = bundle;
    let distribution = overview.segment_distribution.clone();

    view! {
        <div class="d410-header">
            <BackLink />
            <h1>"Dashboard Segmentazione"</h1>
        </div>
        <KpiOverview overview=overview />
        <SegmentDistribution stats=distribution />
        <CustomerTable state=state segments=segments />
        <MarketingCards marketing=marketing />
    }
}

#[component]
fn BackLink() -> impl IntoView {
    view! {
        <a href="/" class="d410-back">
            {icon("arrow-left")}
            "Torna all'upload"
        </a>
    }
}

#[component]
fn KpiOverview(overview: Overview) -> impl IntoView {
    view! {
        <div class="d410-kpis">
            <StatCard
                label="Arrivi totali"
                icon_name="users"
                value=Some(overview.total_arrivals as f64)
                format=StatFormat::Integer
            />
            <StatCard
                label="Revenue totale"
                icon_name="euro"
                value=Some(overview.total_revenue)
                format=StatFormat::Money
                accent="success"
            />
            <StatCard
                label="ADR medio"
                icon_name="trending-up"
                value=Some(overview.adr_medio_generale)
                format=StatFormat::Money
            />
            <StatCard
                label="Valore cliente medio"
                icon_name="pie-chart"
                value=Some(overview.valore_cliente_medio_generale)
                format=StatFormat::Money
            />
        </div>
    }
}

#[component]
fn SegmentDistribution(stats: Vec<SegmentStat>) -> impl IntoView {
    view! {
        <section class="d410-section">
            <h2>"Distribuzione segmenti"</h2>
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Segmento"</TableHeaderCell>
                        <TableHeaderCell>"Clienti"</TableHeaderCell>
                        <TableHeaderCell>"Quota"</TableHeaderCell>
                        <TableHeaderCell>"ADR medio"</TableHeaderCell>
                        <TableHeaderCell>"Revenue"</TableHeaderCell>
                        <TableHeaderCell>"Valore cliente"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {stats
                        .into_iter()
                        .map(|stat| {
                            let bar_style = format!(
                                "{} background-color: {};",
                                share_width(stat.percentuale),
                                segment_color(stat.segment),
                            );
                            view! {
                                <TableRow>
                                    <TableCell>
                                        <span
                                            class="d410-badge"
                                            style=segment_badge_style(stat.segment, "30")
                                        >
                                            {stat.segment.code()}
                                        </span>
                                    </TableCell>
                                    <TableCell class="text-right">{stat.count}</TableCell>
                                    <TableCell>
                                        <div class="d410-bar">
                                            <div class="d410-bar__fill" style=bar_style></div>
                                        </div>
                                        <span class="d410-bar__label">
                                            {format!("{}%", format_number_with_decimals(stat.percentuale, 1))}
                                        </span>
                                    </TableCell>
                                    <TableCell class="text-right">{format_money(stat.adr_medio)}</TableCell>
                                    <TableCell class="text-right">{format_money(stat.revenue_totale)}</TableCell>
                                    <TableCell class="text-right">
                                        {format_money(stat.valore_cliente_medio)}
                                    </TableCell>
                                </TableRow>
                            }
                        })
                        .collect_view()}
                </TableBody>
            </Table>
        </section>
    }
}
