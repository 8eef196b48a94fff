use super::display::segment_badge_style;
use crate::shared::components::table::{
    format_money, format_number_with_decimals, format_ratio_percent,
};
use contracts::dashboards::d410_segmentation::{Marketing, MarketingSegment};
use leptos::prelude::*;

#[component]
pub fn MarketingCards(marketing: Marketing) -> impl IntoView {
    view! {
        <section class="d410-section">
            <h2>"Marketing Intelligence"</h2>
            <div class="d410-marketing-grid">
                {marketing
                    .segmenti
                    .into_iter()
                    .map(|segment| view! { <MarketingCard segment=segment /> })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
fn MarketingCard(segment: MarketingSegment) -> impl IntoView {
    let roi = format!("{}x", format_number_with_decimals(segment.roi_stimato, 1));
    let campaigns = segment.campagne;

    view! {
        <div class="d410-marketing-card">
            <div class="d410-marketing-card__title">
                <span class="d410-badge" style=segment_badge_style(segment.segment, "25")>
                    {segment.segment.code()}
                </span>
                <span class="d410-marketing-card__count">{format!("{} clienti", segment.count)}</span>
            </div>
            <dl class="d410-marketing-card__stats">
                <dt>"Revenue attuale"</dt>
                <dd>{format_money(segment.revenue_attuale)}</dd>
                <dt>"Revenue potenziale"</dt>
                <dd>{format_money(segment.revenue_potenziale_stimata)}</dd>
                <dt>"Conversion rate"</dt>
                <dd>{format_ratio_percent(segment.conversion_rate_storico)}</dd>
                <dt>"ROI stimato"</dt>
                <dd>{roi}</dd>
            </dl>
            {(!campaigns.is_empty()).then(|| {
                view! {
                    <div class="d410-campaigns">
                        <h4>"Campagne suggerite"</h4>
                        <ul>
                            {campaigns
                                .into_iter()
                                .map(|c| {
                                    view! {
                                        <li>
                                            <strong>{c.titolo}</strong>
                                            <span class="d410-campaigns__type">{c.tipo}</span>
                                            <p>{c.descrizione}</p>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    </div>
                }
            })}
        </div>
    }
}
