//! Компонент ячейки таблицы для денежных значений
//!
//! # Примеры
//!
//! ```text
//! // Округлённое значение, "-" если данных нет
//! <TableCellMoney value=row.revenue />
//!
//! // С копейками (центами)
//! <TableCellMoney value=amount decimals=true />
//! ```

use super::number_format::{format_money, format_money_int};
use leptos::prelude::*;
use thaw::*;

/// Текст ячейки: `€ 1.235` / `€ 1.234,56`, либо `-` для пустого значения
pub fn money_cell_text(value: Option<f64>, decimals: bool) -> String {
    match value {
        Some(v) if decimals => format_money(v),
        Some(v) => format_money_int(v),
        None => "-".to_string(),
    }
}

/// Компонент ячейки таблицы для отображения денежных значений в евро
#[component]
pub fn TableCellMoney(
    /// Значение для отображения
    #[prop(into)]
    value: Signal<Option<f64>>,

    /// Показывать два знака после запятой
    #[prop(optional, default = false)]
    decimals: bool,
) -> impl IntoView {
    view! {
        <TableCell class="text-right">
            {move || money_cell_text(value.get(), decimals)}
        </TableCell>
    }
}
