use super::ui;
use crate::core::category::Category;
use crate::core::format::Locale;
use comfy_table::Cell;

pub fn render(locale: Locale) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Tag"),
        ui::header_cell("Category"),
        ui::header_cell("Colour"),
    ]);
    for category in Category::KNOWN {
        table.add_row(vec![
            Cell::new(category.tag()),
            ui::category_cell(&category, locale),
            Cell::new(category.color()),
        ]);
    }
    table.to_string()
}

pub fn run(locale: Locale) {
    println!("{}", render(locale));
}
