//! Table rendering for resource and project listings

use comfy_table::{ContentArrangement, Table, presets};

use st_core::{Project, ResourceRef};

/// Environment variable capping the rendered table width
const MAX_TABLE_WIDTH_ENV: &str = "ST_MAX_TABLE_WIDTH";

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic);

    if let Some(width) = std::env::var(MAX_TABLE_WIDTH_ENV)
        .ok()
        .and_then(|w| w.parse::<u16>().ok())
    {
        table.set_width(width);
    }

    table
}

/// Table of discovered resources, in enumeration order
pub fn resource_table(resources: &[ResourceRef]) -> Table {
    let mut table = base_table();
    table.set_header(vec!["Type", "ID", "Name"]);
    for resource in resources {
        table.add_row(vec![
            resource.kind.noun().to_string(),
            resource.id.clone(),
            resource.name.clone().unwrap_or_default(),
        ]);
    }
    table
}

/// Table of projects
pub fn project_table(projects: &[Project]) -> Table {
    let mut table = base_table();
    table.set_header(vec!["ID", "Name", "Enabled", "Description"]);
    for project in projects {
        table.add_row(vec![
            project.id.clone(),
            project.name.clone(),
            project.enabled.to_string(),
            project.description.clone().unwrap_or_default(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use st_core::ResourceKind;

    use super::*;

    #[test]
    fn test_resource_table_rows() {
        let resources = vec![
            ResourceRef::new(ResourceKind::Server, "s1", Some("vm-1".to_string())),
            ResourceRef::new(ResourceKind::Volume, "v1", None),
        ];
        let rendered = resource_table(&resources).to_string();
        assert!(rendered.contains("server"));
        assert!(rendered.contains("s1"));
        assert!(rendered.contains("vm-1"));
        assert!(rendered.contains("volume"));
        assert!(rendered.contains("v1"));
    }

    #[test]
    fn test_project_table_rows() {
        let projects = vec![Project {
            id: "p1".to_string(),
            name: "demo".to_string(),
            description: Some("demo project".to_string()),
            enabled: true,
        }];
        let rendered = project_table(&projects).to_string();
        assert!(rendered.contains("p1"));
        assert!(rendered.contains("demo"));
        assert!(rendered.contains("true"));
    }
}
