//! Two-pass project cleanup orchestration
//!
//! The destructive pass only ever runs after a non-destructive enumeration
//! pass over the same project and filter set, and only after the confirmation
//! gate approves. The destructive pass re-enumerates; it never reuses the
//! dry-run result set.
//!
//! Failures are recovered at the smallest granularity possible: a backend
//! that fails to list contributes zero resources and the pass moves on; a
//! resource that fails to delete is counted and the batch moves on. One
//! aggregate failure per resource type is reported after its batch completes,
//! and one type's failures never stop processing of the next type. Nothing is
//! ever rolled back.

use std::fmt;

use tracing::{info, warn};

use crate::confirm::ConfirmGate;
use crate::error::{Error, Result};
use crate::traits::CloudApi;
use crate::types::{FilterSet, Project, ResourceKind, ResourceRef};

/// Options controlling a cleanup run
#[derive(Debug, Clone, Default)]
pub struct CleanupOptions {
    /// Creation/update time bounds, passed verbatim to every backend
    pub filters: FilterSet,

    /// Resource kinds excluded from both enumeration and deletion
    pub skip: Vec<ResourceKind>,

    /// Stop after the enumeration pass; mutate nothing
    pub dry_run: bool,

    /// Delete the project itself after a fully successful destructive pass
    pub delete_project: bool,
}

/// Aggregate failure for one resource-type batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub kind: ResourceKind,
    pub failed: usize,
    pub total: usize,
}

impl fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} {}s failed to delete.",
            self.failed,
            self.total,
            self.kind.noun()
        )
    }
}

/// Result of one pass over all backends
#[derive(Debug, Clone, Default)]
pub struct PassReport {
    /// Every resource discovered, in enumeration order
    pub found: Vec<ResourceRef>,

    /// One entry per resource type whose batch had at least one failure
    pub failures: Vec<BatchFailure>,
}

/// What a cleanup run did
#[derive(Debug)]
pub struct CleanupOutcome {
    /// Report of the enumeration (dry-run) pass
    pub preview: PassReport,

    /// Whether the destructive pass ran
    pub executed: bool,

    /// Report of the destructive pass, when it ran
    pub report: Option<PassReport>,
}

impl CleanupOutcome {
    /// Batch failures from the destructive pass
    pub fn failures(&self) -> &[BatchFailure] {
        self.report
            .as_ref()
            .map(|r| r.failures.as_slice())
            .unwrap_or(&[])
    }

    /// Turn accumulated batch failures into a command-level error
    pub fn failure_error(&self) -> Option<Error> {
        let failures = self.failures();
        if failures.is_empty() {
            return None;
        }
        let message = failures
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        Some(Error::Cleanup(message))
    }
}

/// Orchestrator for the two-pass cleanup of one project
pub struct ProjectCleaner<'a> {
    api: &'a dyn CloudApi,
    project: Project,
    options: CleanupOptions,
}

impl<'a> ProjectCleaner<'a> {
    pub fn new(api: &'a dyn CloudApi, project: Project, options: CleanupOptions) -> Self {
        Self {
            api,
            project,
            options,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Non-destructive enumeration pass
    pub async fn enumerate(&self) -> PassReport {
        self.run_pass(false).await
    }

    /// Destructive pass: re-enumerates, then deletes each discovered resource
    pub async fn execute(&self) -> PassReport {
        self.run_pass(true).await
    }

    /// Run the whole workflow: enumerate, report, confirm, destroy
    ///
    /// `preview` receives the enumeration report before the gate is
    /// consulted, so the operator sees what would be deleted while deciding.
    pub async fn run(
        &self,
        gate: &mut dyn ConfirmGate,
        preview: &mut dyn FnMut(&PassReport),
    ) -> Result<CleanupOutcome> {
        let preview_report = self.enumerate().await;
        preview(&preview_report);

        if self.options.dry_run {
            return Ok(CleanupOutcome {
                preview: preview_report,
                executed: false,
                report: None,
            });
        }

        let prompt = format!(
            "About to delete {} resource(s) from project '{}'. Continue",
            preview_report.found.len(),
            self.project.name
        );
        if !gate.confirm(&prompt)? {
            info!(project = %self.project.name, "cleanup declined by operator");
            return Ok(CleanupOutcome {
                preview: preview_report,
                executed: false,
                report: None,
            });
        }

        let report = self.execute().await;

        if self.options.delete_project && report.failures.is_empty() {
            info!(project = %self.project.id, "deleting project");
            self.api.delete_project(&self.project.id).await?;
        }

        Ok(CleanupOutcome {
            preview: preview_report,
            executed: true,
            report: Some(report),
        })
    }

    async fn run_pass(&self, destructive: bool) -> PassReport {
        let mut found = Vec::new();
        let mut failures = Vec::new();

        for kind in ResourceKind::DELETION_ORDER {
            if self.options.skip.contains(&kind) {
                continue;
            }

            // A backend that cannot be listed contributes zero resources;
            // the other backends are still processed.
            let resources = match kind
                .list(self.api, &self.project.id, &self.options.filters)
                .await
            {
                Ok(resources) => resources,
                Err(e) => {
                    warn!(kind = %kind, error = %e, "listing failed, skipping backend");
                    continue;
                }
            };

            let total = resources.len();
            let mut errors = 0usize;

            for resource in resources {
                if destructive {
                    match kind.delete(self.api, &resource.id).await {
                        Ok(()) => info!(kind = %kind, id = %resource.id, "deleted"),
                        Err(e) => {
                            warn!(kind = %kind, id = %resource.id, error = %e, "delete failed");
                            errors += 1;
                        }
                    }
                }
                found.push(resource);
            }

            if errors > 0 {
                failures.push(BatchFailure {
                    kind,
                    failed: errors,
                    total,
                });
            }
        }

        PassReport { found, failures }
    }
}
