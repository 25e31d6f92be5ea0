use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use planner_grid::{BatchReport, SymbolPalette};
use planner_model::{CatalogPage, ConnectionState, EntityKind, PageNav};

pub fn print_palette(palette: &SymbolPalette) {
    if palette.is_empty() {
        println!("This plant list has no plants yet.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Entry"),
        header_cell("Plant"),
        header_cell("Symbol"),
        header_cell("Colour"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (entry_id, entry) in palette.iter() {
        let symbol = if entry.has_own_symbol {
            Cell::new(&entry.glyph.icon)
        } else {
            dim_cell(format!("{} (default)", entry.glyph.icon))
        };
        table.add_row(vec![
            Cell::new(entry_id),
            Cell::new(&entry.plant_name),
            symbol,
            Cell::new(&entry.glyph.color),
        ]);
    }
    println!("{table}");
}

pub fn print_connections(
    primary: EntityKind,
    id: u32,
    secondary: EntityKind,
    state: &ConnectionState,
) {
    println!("{} {id} and its {}:", primary.label(), secondary.plural());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Linked"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for item in &state.list_items {
        table.add_row(vec![
            Cell::new(item.id),
            Cell::new(&item.name),
            Cell::new("✓")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
    }
    for item in &state.options {
        table.add_row(vec![
            Cell::new(item.id),
            Cell::new(&item.name),
            dim_cell("-"),
        ]);
    }
    if state.list_items.is_empty() && state.options.is_empty() {
        println!("Nothing to link.");
    } else {
        println!("{table}");
    }
}

pub fn print_catalog_page(page: &CatalogPage) {
    if page.is_empty() {
        println!("No plants found.");
    } else {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Name"),
            header_cell("Scientific name"),
            header_cell("Family"),
            header_cell("Slug"),
        ]);
        apply_table_style(&mut table);
        for plant in &page.plants {
            table.add_row(vec![
                Cell::new(plant.display_name()),
                optional_cell(plant.scientific_name.as_deref()),
                optional_cell(
                    plant
                        .family_common_name
                        .as_deref()
                        .or(plant.family.as_deref()),
                ),
                dim_cell(&plant.slug),
            ]);
        }
        println!("{table}");
    }
    for nav in [PageNav::First, PageNav::Prev, PageNav::Next, PageNav::Last] {
        if let Some(link) = page.links.get(nav) {
            println!("{nav:>8} page: {link}");
        }
    }
}

pub fn print_batch_report(action: &str, report: &BatchReport) {
    println!(
        "{action}: {} of {} cells saved",
        report.succeeded.len(),
        report.total()
    );
    if report.is_success() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Cell"),
        header_cell("Request"),
        header_cell("Error"),
        header_cell("Retry"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for failure in &report.failed {
        let retry = if failure.error.is_retryable() {
            Cell::new("yes").fg(Color::Yellow)
        } else {
            dim_cell("no")
        };
        table.add_row(vec![
            Cell::new(failure.request.coord()),
            Cell::new(failure.request),
            Cell::new(failure.error.message()).fg(Color::Red),
            retry,
        ]);
    }
    eprintln!("Failed cells (the grid above still shows them as painted locally):");
    eprintln!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) if !value.is_empty() => Cell::new(value),
        _ => dim_cell("-"),
    }
}
