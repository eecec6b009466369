//! Page layout loading. The layout file is RON-encoded [`PageLayout`].

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{bail, Context};
use portfolio_core::{NavigatorSettings, SectionRegistry, SiteSettings};
use portfolio_engine::PageLayout;
use site_logging::site_info;

pub(crate) fn load_layout(path: &Path) -> anyhow::Result<PageLayout> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading page layout {}", path.display()))?;
    let layout: PageLayout = ron::from_str(&text)
        .with_context(|| format!("parsing page layout {}", path.display()))?;
    validate(&layout)?;
    Ok(layout)
}

/// Loads `path`, falling back to the built-in layout when the file does not exist.
pub(crate) fn load_or_default(path: &Path) -> anyhow::Result<PageLayout> {
    match fs::metadata(path) {
        Err(err) if err.kind() == ErrorKind::NotFound => {
            site_info!("no layout at {}; using built-in layout", path.display());
            Ok(PageLayout::default())
        }
        _ => load_layout(path),
    }
}

fn validate(layout: &PageLayout) -> anyhow::Result<()> {
    if layout.viewport_height <= 0.0 {
        bail!("viewport_height must be positive");
    }
    if let Some(section) = layout.sections.iter().find(|s| s.height < 0.0) {
        bail!("section {} has a negative height", section.id);
    }
    SectionRegistry::new(layout.sections.iter().map(|s| s.id.clone()))
        .context("layout sections")?;
    Ok(())
}

/// Site settings whose navigator mirrors the layout's header and menu.
pub(crate) fn site_settings(layout: &PageLayout) -> anyhow::Result<SiteSettings> {
    let sections = SectionRegistry::new(layout.sections.iter().map(|s| s.id.clone()))
        .context("layout sections")?;
    Ok(SiteSettings {
        sections,
        navigator: NavigatorSettings {
            header_offset_px: layout.header_height,
            menu_collapse: layout.menu_collapse(),
        },
        ..SiteSettings::default()
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use portfolio_engine::PageLayout;
    use tempfile::TempDir;

    use super::{load_layout, load_or_default, site_settings};

    #[test]
    fn reads_ron_layout_with_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("layout.ron");
        fs::write(
            &path,
            r#"(
                viewport_height: 700.0,
                header_height: 64.0,
                menu_height: 280.0,
                menu_collapse_ms: 450,
                sections: [
                    (id: "home", height: 700.0),
                    (id: "contact", height: 900.0),
                ],
            )"#,
        )
        .unwrap();

        let layout = load_layout(&path).unwrap();
        assert_eq!(layout.smooth_scroll_ms, 600);
        assert_eq!(layout.footer_height, 0.0);
        assert_eq!(layout.sections.len(), 2);

        let settings = site_settings(&layout).unwrap();
        assert_eq!(settings.navigator.header_offset_px, 64.0);
        assert_eq!(settings.navigator.menu_collapse, Duration::from_millis(450));
        assert_eq!(settings.sections.len(), 2);
    }

    #[test]
    fn missing_file_falls_back_to_builtin_layout() {
        let temp = TempDir::new().unwrap();
        let layout = load_or_default(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(layout, PageLayout::default());
    }

    #[test]
    fn rejects_duplicate_sections_and_bad_syntax() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("layout.ron");
        fs::write(
            &path,
            r#"(viewport_height: 700.0, header_height: 64.0, menu_height: 0.0,
                menu_collapse_ms: 0,
                sections: [(id: "home", height: 1.0), (id: "home", height: 1.0)])"#,
        )
        .unwrap();
        assert!(load_layout(&path).is_err());

        fs::write(&path, "not ron at all").unwrap();
        assert!(load_or_default(&path).is_err());
    }
}
