//! Утилиты форматирования чисел (итальянская локаль: `1.234,56`)

/// Форматирует число с разделителем тысяч (точка) и указанным количеством знаков после запятой
///
/// # Примеры
///
/// ```
/// use frontend::shared::components::table::format_number_with_decimals;
///
/// let formatted = format_number_with_decimals(1234.567, 2);
/// assert_eq!(formatted, "1.234,57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    let formatted = format!("{:.prec$}", value, prec = decimals.min(6) as usize);

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    // Точка каждые 3 цифры с конца целой части
    let mut grouped = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    match decimal_part {
        Some(d) => format!("{}{},{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Денежное значение в евро: `€ 1.234,56`
pub fn format_money(value: f64) -> String {
    format!("€ {}", format_number_with_decimals(value, 2))
}

/// Округлённое денежное значение для ячеек таблицы: `€ 1.235`
pub fn format_money_int(value: f64) -> String {
    format!("€ {}", format_number_with_decimals(value, 0))
}

/// Целое число с разделителем тысяч
pub fn format_number_int(value: f64) -> String {
    format_number_with_decimals(value, 0)
}

/// Доля 0..=1 в процентах с одним знаком: `0.125` -> `12,5%`
pub fn format_ratio_percent(ratio: f64) -> String {
    format!("{}%", format_number_with_decimals(ratio * 100.0, 1))
}
