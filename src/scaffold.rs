use anyhow::{Context, Result};
use camino::Utf8Path;
use tracing::debug;

use crate::project::{ProjectConfig, Variant};
use crate::templates;

/// One file to produce in the target directory. `Templated` files go through
/// placeholder substitution; `Verbatim` files are copied byte-for-byte.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FileTask {
    Verbatim {
        template: &'static str,
        destination: &'static str,
    },
    Templated {
        template: &'static str,
        destination: &'static str,
    },
}

impl FileTask {
    pub fn destination(self) -> &'static str {
        match self {
            FileTask::Verbatim { destination, .. } | FileTask::Templated { destination, .. } => {
                destination
            }
        }
    }
}

const COMMON_TASKS: [FileTask; 5] = [
    FileTask::Templated {
        template: "js/_package.json",
        destination: "package.json",
    },
    FileTask::Templated {
        template: "common/readme.md",
        destination: "readme.md",
    },
    FileTask::Verbatim {
        template: "common/_editorconfig",
        destination: ".editorconfig",
    },
    FileTask::Verbatim {
        template: "common/_gitattributes",
        destination: ".gitattributes",
    },
    FileTask::Verbatim {
        template: "common/_gitignore",
        destination: ".gitignore",
    },
];

const JS_TASKS: [FileTask; 3] = [
    FileTask::Templated {
        template: "js/cli.js",
        destination: "cli.js",
    },
    FileTask::Verbatim {
        template: "js/ui.js",
        destination: "ui.js",
    },
    FileTask::Verbatim {
        template: "js/test.js",
        destination: "test.js",
    },
];

const TS_TASKS: [FileTask; 4] = [
    FileTask::Verbatim {
        template: "ts/source/ui.tsx",
        destination: "source/ui.tsx",
    },
    FileTask::Templated {
        template: "ts/source/cli.tsx",
        destination: "source/cli.tsx",
    },
    FileTask::Verbatim {
        template: "ts/source/test.tsx",
        destination: "source/test.tsx",
    },
    FileTask::Verbatim {
        template: "ts/tsconfig.json",
        destination: "tsconfig.json",
    },
];

/// Build the ordered file list for a variant. The TypeScript manifest lives
/// in its own template, so the common manifest entry is swapped out.
pub fn plan(variant: Variant) -> Vec<FileTask> {
    let mut tasks: Vec<FileTask> = COMMON_TASKS.to_vec();
    match variant {
        Variant::JavaScript => tasks.extend(JS_TASKS),
        Variant::TypeScript => {
            tasks[0] = FileTask::Templated {
                template: "ts/_package.json",
                destination: "package.json",
            };
            tasks.extend(TS_TASKS);
        }
    }
    tasks
}

/// Copy stage: produce every variant file in the target directory. Fails fast
/// on the first unreadable template or unwritable destination; partial output
/// is left in place.
pub fn copy_files(config: &ProjectConfig) -> Result<()> {
    for task in plan(config.variant) {
        let destination = config.project_dir.join(task.destination());
        write_task(&task, &destination, &config.package_name)
            .with_context(|| format!("creating {}", destination))?;
        debug!(file = %destination, "created");
    }
    Ok(())
}

fn write_task(task: &FileTask, destination: &Utf8Path, package_name: &str) -> Result<()> {
    match task {
        FileTask::Verbatim { template, .. } => {
            let bytes = templates::get_bytes(template)?;
            templates::write_to(destination, &bytes)
        }
        FileTask::Templated { template, .. } => {
            let rendered = templates::render(template, package_name)?;
            templates::write_to(destination, rendered.as_bytes())
        }
    }
}
