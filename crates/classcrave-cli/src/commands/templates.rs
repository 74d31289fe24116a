//! The `classcrave templates` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use classcrave_core::config::PracticeAssignmentConfig;
use classcrave_core::generator::generate;
use classcrave_core::template::{Template, TemplateId};

pub fn execute() -> Result<()> {
    let defaults = PracticeAssignmentConfig::default();

    let mut table = Table::new();
    table.set_header(vec!["Template", "Title", "Input", "Example"]);

    for id in TemplateId::ALL {
        let template = Template::for_id(id, &defaults);
        let Some(example) = generate(&template, "example", 1).into_iter().next() else {
            continue;
        };
        table.add_row(vec![
            Cell::new(id),
            Cell::new(id.title()),
            Cell::new(example.input_mode),
            Cell::new(example.prompt),
        ]);
    }

    println!("{table}");
    Ok(())
}
