//! Command table and argument routing
//!
//! Every task the CLI understands is declared once in [`TASKS`] with its
//! aliases, scopes, and options. [`parse`] normalizes aliases and validates the
//! raw arguments against that table, producing an [`Invocation`] that the
//! command handlers dispatch on.

use anyhow::{anyhow, bail, Result};
use ojet_tooling::RawOptions;
use std::fmt::Write as _;

/// An option accepted by a task
#[derive(Debug)]
pub struct OptionSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// `--name value` consumes the next argument; flags never do
    pub takes_value: bool,
    pub description: &'static str,
}

/// A scope (the noun after the task)
#[derive(Debug)]
pub struct ScopeSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

/// One row of the command table
#[derive(Debug)]
pub struct TaskSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub scopes: &'static [ScopeSpec],
    pub default_scope: Option<&'static str>,
    pub options: &'static [OptionSpec],
    pub description: &'static str,
}

impl TaskSpec {
    fn matches(&self, token: &str) -> bool {
        self.name == token || self.aliases.contains(&token)
    }

    fn find_scope(&self, token: &str) -> Option<&'static ScopeSpec> {
        self.scopes
            .iter()
            .find(|s| s.name == token || s.aliases.contains(&token))
    }

    fn find_option(&self, token: &str) -> Option<&'static OptionSpec> {
        self.options
            .iter()
            .find(|o| o.name == token || o.aliases.contains(&token))
    }

    fn scope_names(&self) -> String {
        self.scopes
            .iter()
            .map(|s| s.name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

const fn flag(name: &'static str, description: &'static str) -> OptionSpec {
    OptionSpec {
        name,
        aliases: &[],
        takes_value: false,
        description,
    }
}

const fn value(name: &'static str, description: &'static str) -> OptionSpec {
    OptionSpec {
        name,
        aliases: &[],
        takes_value: true,
        description,
    }
}

const APP: ScopeSpec = ScopeSpec {
    name: "app",
    aliases: &["application"],
};
const COMPONENT: ScopeSpec = ScopeSpec {
    name: "component",
    aliases: &["comp", "components"],
};
const PACK: ScopeSpec = ScopeSpec {
    name: "pack",
    aliases: &["packs"],
};
const THEME: ScopeSpec = ScopeSpec {
    name: "theme",
    aliases: &["themes"],
};
const HYBRID: ScopeSpec = ScopeSpec {
    name: "hybrid",
    aliases: &[],
};
const PLATFORM: ScopeSpec = ScopeSpec {
    name: "platform",
    aliases: &["platforms"],
};
const PLUGIN: ScopeSpec = ScopeSpec {
    name: "plugin",
    aliases: &["plugins"],
};
const EXCHANGE: ScopeSpec = ScopeSpec {
    name: "exchange",
    aliases: &[],
};

const BUILD_OPTIONS: &[OptionSpec] = &[
    value("platform", "web, android, ios, or windows"),
    flag("release", "Build for release instead of development"),
    value("theme", "Theme to build, optionally name:platform"),
    value("themes", "Comma-separated additional themes, or 'all'"),
    flag("sass", "Compile Sass (use --sass=false to skip)"),
    flag("pcss", "Compile PostCSS (use --pcss=false to skip)"),
    value("destination", "Hybrid destination (device, emulator, browser)"),
    flag("device", "Shorthand for --destination=device"),
    flag("emulator", "Shorthand for --destination=emulator"),
    value("user-options", "Opaque value passed through to tooling hooks"),
];

const SERVE_OPTIONS: &[OptionSpec] = &[
    value("platform", "web, android, ios, or windows"),
    flag("release", "Serve a release build"),
    value("theme", "Theme to build, optionally name:platform"),
    value("themes", "Comma-separated additional themes, or 'all'"),
    flag("sass", "Compile Sass (use --sass=false to skip)"),
    flag("pcss", "Compile PostCSS (use --pcss=false to skip)"),
    value("destination", "Hybrid destination (device, emulator, browser)"),
    flag("device", "Shorthand for --destination=device"),
    flag("emulator", "Shorthand for --destination=emulator"),
    value("user-options", "Opaque value passed through to tooling hooks"),
    value("server-port", "Dev server port (default 8000)"),
    value("livereload-port", "Live reload port (default 35729)"),
    flag("livereload", "Reload the browser on change (--livereload=false to disable)"),
    flag("build", "Build before serving (--build=false to serve existing output)"),
    flag("server-only", "Start the server without opening a browser"),
    value("browser", "Browser to open"),
];

const CREDENTIAL_OPTIONS: &[OptionSpec] = &[
    value("username", "Exchange user name"),
    value("password", "Exchange password"),
];

/// The command table
pub static TASKS: &[TaskSpec] = &[
    TaskSpec {
        name: "create",
        aliases: &[],
        scopes: &[APP, COMPONENT, PACK, THEME],
        default_scope: Some("app"),
        options: &[
            value("template", "blank, basic, a directory, or a .zip file"),
            OptionSpec {
                name: "typescript",
                aliases: &["ts"],
                takes_value: false,
                description: "Generate a TypeScript app",
            },
            value("installer", "npm or yarn"),
            flag("skip-install", "Do not install npm packages"),
            value("pack", "Create the component inside this pack"),
            value("type", "composite or resource"),
        ],
        description: "Scaffold an app, component, pack, or theme",
    },
    TaskSpec {
        name: "add",
        aliases: &[],
        scopes: &[COMPONENT, PACK, HYBRID, PLATFORM, PLUGIN],
        default_scope: None,
        options: &[
            value("on-conflict", "keep, overwrite, or cancel instead of prompting"),
            OptionSpec {
                name: "platforms",
                aliases: &["platform"],
                takes_value: true,
                description: "Comma-separated hybrid platforms",
            },
            value("appid", "Hybrid application id"),
            value("appname", "Hybrid application display name"),
        ],
        description: "Install exchange components or add hybrid support, platforms, and plugins",
    },
    TaskSpec {
        name: "remove",
        aliases: &["rm"],
        scopes: &[COMPONENT, PACK, PLATFORM, PLUGIN],
        default_scope: None,
        options: &[],
        description: "Remove exchange components, platforms, or plugins",
    },
    TaskSpec {
        name: "build",
        aliases: &[],
        scopes: &[APP, COMPONENT],
        default_scope: Some("app"),
        options: BUILD_OPTIONS,
        description: "Build the app or a single component",
    },
    TaskSpec {
        name: "serve",
        aliases: &[],
        scopes: &[APP],
        default_scope: Some("app"),
        options: SERVE_OPTIONS,
        description: "Build and serve the app with live reload",
    },
    TaskSpec {
        name: "list",
        aliases: &["ls"],
        scopes: &[COMPONENT, PACK, PLATFORM, PLUGIN],
        default_scope: Some("component"),
        options: &[],
        description: "List installed components, platforms, or plugins",
    },
    TaskSpec {
        name: "publish",
        aliases: &["pub"],
        scopes: &[COMPONENT, PACK],
        default_scope: None,
        options: CREDENTIAL_OPTIONS,
        description: "Publish a component or pack to the exchange",
    },
    TaskSpec {
        name: "search",
        aliases: &[],
        scopes: &[EXCHANGE],
        default_scope: Some("exchange"),
        options: &[],
        description: "Search the exchange catalog",
    },
    TaskSpec {
        name: "label",
        aliases: &[],
        scopes: &[COMPONENT, PACK],
        default_scope: None,
        options: CREDENTIAL_OPTIONS,
        description: "Attach a label to a published component version",
    },
    TaskSpec {
        name: "package",
        aliases: &["pkg"],
        scopes: &[COMPONENT, PACK],
        default_scope: None,
        options: &[],
        description: "Zip a component or pack into dist/",
    },
    TaskSpec {
        name: "restore",
        aliases: &[],
        scopes: &[APP],
        default_scope: Some("app"),
        options: &[
            value("installer", "npm or yarn"),
            value("on-conflict", "keep, overwrite, or cancel instead of prompting"),
        ],
        description: "Reinstall npm packages, exchange components, and Cordova platforms",
    },
    TaskSpec {
        name: "configure",
        aliases: &["config"],
        scopes: &[APP],
        default_scope: Some("app"),
        options: &[value("exchange-url", "Exchange catalog URL")],
        description: "Set project configuration",
    },
    TaskSpec {
        name: "clean",
        aliases: &[],
        scopes: &[APP, PLATFORM],
        default_scope: Some("app"),
        options: &[],
        description: "Remove build output or clean a Cordova platform",
    },
    TaskSpec {
        name: "strip",
        aliases: &[],
        scopes: &[APP],
        default_scope: Some("app"),
        options: &[],
        description: "Remove all generated and installed content",
    },
    TaskSpec {
        name: "help",
        aliases: &["h"],
        scopes: &[],
        default_scope: None,
        options: &[],
        description: "Show usage for all tasks or one task",
    },
    TaskSpec {
        name: "migrate",
        aliases: &[],
        scopes: &[APP],
        default_scope: Some("app"),
        options: &[],
        description: "Upgrade oraclejetconfig.json to the current layout",
    },
];

/// A validated command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub task: &'static str,
    pub scope: Option<&'static str>,
    pub params: Vec<String>,
    pub options: RawOptions,
}

impl Invocation {
    fn help() -> Self {
        Self {
            task: "help",
            scope: None,
            params: Vec::new(),
            options: RawOptions::new(),
        }
    }

    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    /// Flag value; `--name` and `--name=true` are set, `--name=false` is not
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.option(name), Some("" | "true" | "yes"))
    }

    /// First parameter, or an error naming what is missing
    pub fn required_param(&self, what: &str) -> Result<&str> {
        self.params.first().map(String::as_str).ok_or_else(|| {
            anyhow!(
                "Missing {} for '{} {}'",
                what,
                self.task,
                self.scope.unwrap_or_default()
            )
        })
    }
}

pub fn find_task(token: &str) -> Option<&'static TaskSpec> {
    TASKS.iter().find(|t| t.matches(token))
}

/// Validate raw arguments against [`TASKS`]
pub fn parse(args: &[String]) -> Result<Invocation> {
    let Some((first, rest)) = args.split_first() else {
        return Ok(Invocation::help());
    };

    let task = find_task(first).ok_or_else(|| anyhow!("Task '{}' is not supported.", first))?;

    let mut positionals = Vec::new();
    let mut options = RawOptions::new();
    let mut i = 0;
    while i < rest.len() {
        let token = &rest[i];
        if let Some(body) = token.strip_prefix("--") {
            let (raw_name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (body, None),
            };
            let spec = task.find_option(raw_name).ok_or_else(|| {
                anyhow!(
                    "Option '--{}' is not supported for task '{}'.",
                    raw_name,
                    task.name
                )
            })?;
            let value = match inline {
                Some(value) => value,
                None if spec.takes_value => match rest.get(i + 1) {
                    Some(next) if !next.starts_with("--") => {
                        i += 1;
                        next.clone()
                    }
                    _ => bail!("Option '--{}' requires a value.", spec.name),
                },
                None => "true".to_string(),
            };
            options.insert(spec.name.to_string(), value);
        } else if token.len() > 1 && token.starts_with('-') {
            bail!(
                "Option '{}' is not supported for task '{}'. Global flags such as -v go before the task.",
                token,
                task.name
            );
        } else {
            positionals.push(token.clone());
        }
        i += 1;
    }

    if task.scopes.is_empty() {
        return Ok(Invocation {
            task: task.name,
            scope: None,
            params: positionals,
            options,
        });
    }

    let (scope, params) = match positionals.split_first() {
        Some((token, params)) => match task.find_scope(token) {
            Some(scope) => (scope.name, params.to_vec()),
            None => match task.default_scope {
                Some(default) => (default, positionals.clone()),
                None => bail!(
                    "Invalid command: '{} {}'. Valid scopes for '{}' are: {}.",
                    task.name,
                    token,
                    task.name,
                    task.scope_names()
                ),
            },
        },
        None => match task.default_scope {
            Some(default) => (default, Vec::new()),
            None => bail!(
                "Task '{}' requires a scope: {}.",
                task.name,
                task.scope_names()
            ),
        },
    };

    Ok(Invocation {
        task: task.name,
        scope: Some(scope),
        params,
        options,
    })
}

/// Overview of every task
pub fn usage() -> String {
    let mut out = String::from("Usage: ojet <task> [scope] [parameters] [--options]\n\nTasks:\n");
    for task in TASKS {
        let _ = writeln!(out, "  {:<10} {}", task.name, task.description);
    }
    out.push_str("\nRun 'ojet help <task>' for the scopes and options of a task.");
    out
}

/// Details of a single task
pub fn task_usage(task: &TaskSpec) -> String {
    let mut out = format!("ojet {} - {}\n", task.name, task.description);
    if !task.aliases.is_empty() {
        let _ = writeln!(out, "Aliases: {}", task.aliases.join(", "));
    }
    if !task.scopes.is_empty() {
        let _ = write!(out, "Scopes: {}", task.scope_names());
        if let Some(default) = task.default_scope {
            let _ = write!(out, " (default: {})", default);
        }
        out.push('\n');
    }
    if !task.options.is_empty() {
        out.push_str("Options:\n");
        for option in task.options {
            let name = if option.takes_value {
                format!("--{}=<value>", option.name)
            } else {
                format!("--{}", option.name)
            };
            let _ = writeln!(out, "  {:<26} {}", name, option.description);
        }
    }
    out
}
