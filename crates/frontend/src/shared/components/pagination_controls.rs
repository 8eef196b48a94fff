use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// PaginationControls component - previous/next pager without a total count
///
/// The server does not report how many rows exist, so "next" is driven by the
/// caller (usually: the last page came back full).
#[component]
pub fn PaginationControls(
    /// Current page (0-indexed)
    #[prop(into)]
    current_page: Signal<u32>,

    /// Whether another page may exist
    #[prop(into)]
    has_next: Signal<bool>,

    /// Callback for "previous page"
    on_previous: Callback<()>,

    /// Callback for "next page"
    on_next: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="pagination-controls">
            <Button
                size=ButtonSize::Small
                appearance=ButtonAppearance::Secondary
                disabled=Signal::derive(move || current_page.get() == 0)
                on_click=move |_| on_previous.run(())
            >
                {icon("chevron-left")}
                "Indietro"
            </Button>
            <span class="pagination-info">
                {move || format!("Pagina {}", current_page.get() + 1)}
            </span>
            <Button
                size=ButtonSize::Small
                appearance=ButtonAppearance::Secondary
                disabled=Signal::derive(move || !has_next.get())
                on_click=move |_| on_next.run(())
            >
                "Avanti"
                {icon("chevron-right")}
            </Button>
        </div>
    }
}
