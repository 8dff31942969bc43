//! `st project list` - list projects visible to the caller

use clap::Args;

use super::get_cloud_client;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, project_table};
use st_core::CloudApi;

#[derive(Args, Debug)]
pub struct ListArgs {}

pub async fn execute(_args: ListArgs, cloud: Option<&str>, formatter: &Formatter) -> ExitCode {
    let client = match get_cloud_client(cloud, formatter) {
        Ok(client) => client,
        Err(code) => return code,
    };

    match client.list_projects().await {
        Ok(projects) => {
            if formatter.is_json() {
                formatter.json(&projects);
            } else if projects.is_empty() {
                formatter.println("No projects found.");
            } else {
                formatter.println(&project_table(&projects).to_string());
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to list projects: {e}"));
            ExitCode::from_core_error(&e)
        }
    }
}
