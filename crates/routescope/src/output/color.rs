//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Exposed:   yellow  (publicly exposed nodes)
//!   - Risk:      red     (vulnerable nodes, failures)
//!   - Sink:      magenta (data stores)
//!   - Reference: cyan    (node names, arrows)
//!   - Success:   green   (summary counts)
//!   - Muted:     dimmed  (field labels, kinds)
//!   - Emphasis:  bold    (section headers)

use crate::domain::Node;
use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Colorize a node name (cyan).
pub(crate) fn colorize_name(name: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return name.to_string();
    }
    name.cyan().to_string()
}

/// Colorize a node kind; data stores stand out.
pub(crate) fn colorize_kind(kind: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return kind.to_string();
    }
    match kind {
        "rds" | "sql" | "db" | "sink" => kind.magenta().to_string(),
        _ => kind.dimmed().to_string(),
    }
}

/// Risk markers for a node: public exposure and vulnerability count.
pub(crate) fn node_markers(node: &Node, config: &OutputConfig) -> String {
    let mut markers = Vec::new();

    if node.is_public() {
        let icon = if config.use_ascii { "[public]" } else { "◉ public" };
        markers.push(warning(icon, config));
    }
    if node.has_vulnerabilities() {
        let count = node.vulnerabilities.as_ref().map_or(0, Vec::len);
        let icon = if config.use_ascii { "!" } else { "⚠" };
        markers.push(error(&format!("{icon} {count} vuln"), config));
    }

    markers.join(" ")
}

/// Directed-edge arrow, with ASCII fallback.
pub(crate) fn arrow(config: &OutputConfig) -> String {
    let icon = if config.use_ascii { "->" } else { "→" };
    cyan(icon, config)
}

/// Apply dimmed style to text (for labels/field names).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Apply bold style to text (for section headers).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

/// Apply cyan color to text (for arrows/connectors).
pub(crate) fn cyan(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}
