//! FILENAME: export/examples/transactions.rs
//! End-to-end tour of the table pipeline: declare a view scheme for a
//! fuel-transaction record, search and sort it, render a page, then
//! export the result to xlsx.

use table_core::{presets, FieldValue, FormatTag};
use table_engine::{
    calculate_view, next_sort_state, FieldDescriptor, PageRequest, SearchState, ViewScheme,
};

#[derive(Debug, Clone)]
struct Transaction {
    name: String,
    date: String,
    card: String,
    address: String,
    fuel_count: f64,
    cost: f64,
}

fn transaction_scheme() -> ViewScheme<Transaction> {
    ViewScheme::new()
        .with_field(
            FieldDescriptor::new("name", "Транспорт", FormatTag::String, |t: &Transaction| {
                FieldValue::text(t.name.clone())
            })
            .sortable(),
        )
        .with_field(
            FieldDescriptor::new("date", "Дата", FormatTag::Date, |t: &Transaction| {
                FieldValue::text(t.date.clone())
            })
            .sortable(),
        )
        .with_field(FieldDescriptor::new(
            "card",
            "Карта",
            FormatTag::String,
            |t: &Transaction| FieldValue::text(t.card.clone()),
        ))
        .with_field(
            FieldDescriptor::new("address", "Адрес", FormatTag::String, |t: &Transaction| {
                FieldValue::text(t.address.clone())
            })
            .sortable(),
        )
        .with_field(
            FieldDescriptor::new(
                "fuelCount",
                "Количество",
                FormatTag::Number,
                |t: &Transaction| FieldValue::Number(t.fuel_count),
            )
            .sortable(),
        )
        .with_field(
            FieldDescriptor::new("cost", "Стоимость", FormatTag::Price, |t: &Transaction| {
                FieldValue::Number(t.cost)
            })
            .sortable()
            .with_width(140.0),
        )
}

fn sample_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            name: "КАМАЗ-65115".into(),
            date: "2021-12-10T08:15:00".into(),
            card: "7005".into(),
            address: "Москва, Ленинградское ш. 25".into(),
            fuel_count: 177.0,
            cost: 8283.5,
        },
        Transaction {
            name: "ГАЗель NEXT".into(),
            date: "2021-11-02T10:00:00".into(),
            card: "7006".into(),
            address: "Тверь, пр-т Победы 3".into(),
            fuel_count: 52.0,
            cost: 2410.0,
        },
        Transaction {
            name: "КАМАЗ-5490".into(),
            date: "2022-01-05T12:30:00".into(),
            card: "7011".into(),
            address: "Москва, МКАД 41 км".into(),
            fuel_count: 310.0,
            cost: 14880.0,
        },
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let scheme = transaction_scheme();
    let items = sample_transactions();
    let locale = presets::ru();

    // Search "камаз" (case-insensitive), then two header clicks on
    // "cost": ascending, then descending.
    let search = SearchState::new("name", "камаз");
    let sort = next_sort_state(&scheme, None, "cost");
    let sort = next_sort_state(&scheme, sort.as_ref(), "cost");

    let view = calculate_view(
        &items,
        &scheme,
        Some(&search),
        sort.as_ref(),
        Some(PageRequest::new(0, 10)),
        &locale,
    )?;

    for header in &view.headers {
        print!("{:<28}", header.title);
    }
    println!();
    for row in &view.rows {
        for cell in row {
            print!("{:<28}", cell.formatted);
        }
        println!();
    }
    println!(
        "page {} of {} ({} rows matched)",
        view.page + 1,
        view.page_count,
        view.total_rows
    );

    let path = std::env::temp_dir().join("table.xlsx");
    export::save_xlsx(&items, &scheme, &path)?;
    println!("exported to {}", path.display());

    Ok(())
}
