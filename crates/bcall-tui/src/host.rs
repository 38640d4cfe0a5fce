//! Desktop host: backs every capability by launching external programs.
//!
//! Commands come from `apps.*` templates in the config. Openers fall back to
//! the platform opener; search, graph and the web viewer exist only when
//! configured.

use bcall_core::capability::{
    FileOpener, FolderRevealer, GraphActivator, PathResolver, PlaceholderPane, SearchRunner,
    UrlOpener,
};
use bcall_core::config::AppConfig;
use bcall_core::{BookmarkStore, Capabilities, CapabilityError, CapabilityResult};
use futures_util::future::BoxFuture;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

fn platform_opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

/// A program plus arguments with `{name}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    program: String,
    args: Vec<String>,
}

impl CommandTemplate {
    /// Whitespace-separated template. `None` when blank.
    pub fn parse(template: &str) -> Option<Self> {
        let mut words = template.split_whitespace().map(str::to_string);
        let program = words.next()?;
        Some(Self {
            program,
            args: words.collect(),
        })
    }

    /// Configured template, or the platform opener.
    pub fn or_opener(template: Option<&str>) -> Self {
        template.and_then(Self::parse).unwrap_or_else(|| Self {
            program: platform_opener().to_string(),
            args: Vec::new(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Substitute `vars`. The first var is appended when the template names none
    /// of them; arguments that end up empty are dropped.
    pub fn render(&self, vars: &[(&str, &str)]) -> Vec<String> {
        let mentions_any = self
            .args
            .iter()
            .any(|arg| vars.iter().any(|(name, _)| arg.contains(&format!("{{{name}}}"))));

        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                vars.iter().fold(arg.clone(), |acc, (name, value)| {
                    acc.replace(&format!("{{{name}}}"), value)
                })
            })
            .filter(|arg| !arg.is_empty())
            .collect();

        if !mentions_any && let Some((_, value)) = vars.first() {
            args.push((*value).to_string());
        }
        args
    }

    /// Run to completion.
    async fn run(&self, vars: &[(&str, &str)]) -> CapabilityResult {
        let args = self.render(vars);
        debug!("Running {} {:?}", self.program, args);

        let status = tokio::process::Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|source| CapabilityError::Launch {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(CapabilityError::Exit {
                program: self.program.clone(),
                status: status.to_string(),
            })
        }
    }

    /// Fire and forget.
    fn spawn(&self, vars: &[(&str, &str)]) -> CapabilityResult {
        let args = self.render(vars);
        debug!("Spawning {} {:?}", self.program, args);

        std::process::Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(drop)
            .map_err(|source| CapabilityError::Launch {
                program: self.program.clone(),
                source,
            })
    }
}

/// Resolves vault-relative paths against the vault root.
#[derive(Debug, Clone)]
pub struct VaultResolver {
    root: PathBuf,
}

impl VaultResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn absolute(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl PathResolver for VaultResolver {
    fn resolve_basename(&self, path: &str) -> Option<String> {
        let full = self.absolute(path);
        if !full.is_file() {
            return None;
        }
        full.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
    }
}

struct TemplateFileOpener {
    template: CommandTemplate,
    resolver: VaultResolver,
}

impl FileOpener for TemplateFileOpener {
    fn open_file<'a>(
        &'a self,
        path: &'a str,
        subpath: Option<&'a str>,
    ) -> BoxFuture<'a, CapabilityResult> {
        Box::pin(async move {
            let full = self.resolver.absolute(path).to_string_lossy().into_owned();
            self.template
                .run(&[
                    ("path", full.as_str()),
                    ("subpath", subpath.unwrap_or_default()),
                ])
                .await
        })
    }
}

struct TemplateFolderRevealer {
    template: CommandTemplate,
    resolver: VaultResolver,
}

impl FolderRevealer for TemplateFolderRevealer {
    fn reveal_folder(&self, path: &str) -> CapabilityResult {
        let full = self.resolver.absolute(path);
        if !full.is_dir() {
            return Err(CapabilityError::NotFound(path.to_string()));
        }
        let full = full.to_string_lossy().into_owned();
        self.template.spawn(&[("path", full.as_str())])
    }
}

struct TemplateSearchRunner(CommandTemplate);

impl SearchRunner for TemplateSearchRunner {
    fn run_search(&self, query: &str) -> CapabilityResult {
        self.0.spawn(&[("query", query)])
    }
}

struct TemplateGraphActivator(CommandTemplate);

impl GraphActivator for TemplateGraphActivator {
    fn activate_scoped_graph<'a>(
        &'a self,
        bookmark_id: &'a str,
    ) -> BoxFuture<'a, CapabilityResult> {
        Box::pin(async move { self.0.run(&[("id", bookmark_id)]).await })
    }
}

struct TemplateUrlOpener {
    browser: CommandTemplate,
    web_viewer: Option<CommandTemplate>,
}

impl UrlOpener for TemplateUrlOpener {
    fn open_url(&self, url: &str, prefer_in_app: bool) -> CapabilityResult {
        let template = match &self.web_viewer {
            Some(viewer) if prefer_in_app => viewer,
            _ => &self.browser,
        };
        template.spawn(&[("url", url)])
    }
}

/// "Opening…" indicator shown while open-all runs.
#[derive(Debug, Clone, Default)]
pub struct OpeningOverlay {
    visible: Arc<AtomicBool>,
}

impl OpeningOverlay {
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Acquire)
    }
}

impl PlaceholderPane for OpeningOverlay {
    fn show(&self) -> BoxFuture<'_, CapabilityResult> {
        Box::pin(async move {
            info!("Opening bookmarks");
            self.visible.store(true, Ordering::Release);
            Ok(())
        })
    }

    fn dismiss(&self) {
        self.visible.store(false, Ordering::Release);
    }
}

/// Capabilities of a desktop session.
#[derive(Debug, Clone)]
pub struct DesktopHost {
    apps: AppConfig,
    vault: PathBuf,
    overlay: OpeningOverlay,
}

impl DesktopHost {
    /// Without a vault, paths are resolved against the working directory.
    pub fn new(apps: AppConfig, vault: Option<&Path>) -> Self {
        Self {
            apps,
            vault: vault.map_or_else(|| PathBuf::from("."), Path::to_path_buf),
            overlay: OpeningOverlay::default(),
        }
    }

    pub fn overlay(&self) -> &OpeningOverlay {
        &self.overlay
    }

    pub fn capabilities(&self, store: &BookmarkStore) -> Capabilities {
        let resolver = VaultResolver::new(&self.vault);
        let apps = &self.apps;

        let mut caps = Capabilities::new()
            .with_file_opener(Arc::new(TemplateFileOpener {
                template: CommandTemplate::or_opener(apps.file_opener.as_deref()),
                resolver: resolver.clone(),
            }))
            .with_folder_revealer(Arc::new(TemplateFolderRevealer {
                template: CommandTemplate::or_opener(apps.file_manager.as_deref()),
                resolver: resolver.clone(),
            }))
            .with_url_opener(Arc::new(TemplateUrlOpener {
                browser: CommandTemplate::or_opener(apps.browser.as_deref()),
                web_viewer: apps.web_viewer.as_deref().and_then(CommandTemplate::parse),
            }))
            .with_registry(Arc::new(store.clone()))
            .with_path_resolver(Arc::new(resolver))
            .with_placeholder(Arc::new(self.overlay.clone()))
            .prefer_in_app_urls(apps.allow_external_urls_in_app && apps.web_viewer.is_some());

        if let Some(template) = apps.search_command.as_deref().and_then(CommandTemplate::parse) {
            caps = caps.with_search_runner(Arc::new(TemplateSearchRunner(template)));
        }
        if let Some(template) = apps.graph_command.as_deref().and_then(CommandTemplate::parse) {
            caps = caps.with_graph_activator(Arc::new(TemplateGraphActivator(template)));
        }

        debug!("Desktop capabilities: {:?}", caps.present());
        caps
    }
}
