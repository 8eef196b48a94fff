use crate::shared::components::table::{format_money, format_number_int};
use crate::shared::icons::icon;
use leptos::prelude::*;

/// How a KPI value is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatFormat {
    Money,
    Integer,
}

pub fn format_stat(val: f64, fmt: StatFormat) -> String {
    match fmt {
        StatFormat::Money => format_money(val),
        StatFormat::Integer => format_number_int(val),
    }
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    label: &'static str,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// Primary numeric value (None = not loaded yet)
    #[prop(into)]
    value: Signal<Option<f64>>,
    /// How to format the value
    format: StatFormat,
    /// Accent modifier, e.g. "success" -> `stat-card--success`
    #[prop(optional)]
    accent: &'static str,
) -> impl IntoView {
    let class = if accent.is_empty() {
        "stat-card".to_string()
    } else {
        format!("stat-card stat-card--{}", accent)
    };

    let formatted = move || match value.get() {
        Some(v) => format_stat(v, format),
        None => "—".to_string(),
    };

    view! {
        <div class=class>
            <div class="stat-card__icon">
                {icon(icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{formatted}</div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_stat() {
        assert_eq!(format_stat(120.0, StatFormat::Integer), "120");
        assert_eq!(format_stat(54000.0, StatFormat::Money), "€ 54.000,00");
    }
}
