//! Template catalog commands.

use anyhow::{Result, anyhow};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use artisan_core::template::{find_template, templates_in};
use artisan_types::template::TemplateCategory;

use super::render::render_elements;

/// List built-in templates, optionally filtered by category.
pub fn list_templates(category: Option<&str>, json: bool) -> Result<()> {
    let category = category
        .map(|c| c.parse::<TemplateCategory>().map_err(|e| anyhow!(e)))
        .transpose()?;
    let templates = templates_in(category);

    if json {
        println!("{}", serde_json::to_string_pretty(&templates)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Category").fg(Color::White),
        Cell::new("Description").fg(Color::White),
    ]);

    for template in &templates {
        table.add_row(vec![
            Cell::new(template.id).fg(Color::DarkGrey),
            Cell::new(&template.title).fg(Color::Cyan),
            Cell::new(template.category),
            Cell::new(&template.description),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {}",
        style("Start from one with: artisan workspace --template <id>").dim()
    );
    println!();

    Ok(())
}

/// Show one template in full.
pub fn show_template(id: u32, json: bool) -> Result<()> {
    let template = find_template(id).ok_or_else(|| anyhow!("no template with id {id}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&template)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style(&template.title).cyan().bold(),
        style(format!("({})", template.category)).dim()
    );
    println!("  {}", template.description);
    println!();
    println!("{}", render_elements(&template.prompt));
    println!();

    Ok(())
}
