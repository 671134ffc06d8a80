pub mod builder;
pub mod config;
pub mod frontmatter;
pub mod markdown;
pub mod navigation;
pub mod renderer;
pub mod resolver;
pub mod scanner;
pub mod site;
pub mod slug;
pub mod template;

// Re-export main types
pub use builder::{BuildError, BuildReport, build_site};
pub use markdown::{RenderOptions, render_markdown};
pub use navigation::{NavItem, NavNode, NavTree};
pub use renderer::SiteRenderer;
pub use resolver::{Document, ResolveError, RouteResolver};
pub use scanner::SiteScanner;
pub use site::{DocSite, Page};
pub use slug::Slug;
pub use template::{TemplateError, TemplateRenderer};
