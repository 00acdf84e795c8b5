//! FILENAME: export/src/print.rs
//! Print-to-PDF page stylesheet generation.
//!
//! Printing a table means sizing the physical page to the rendered
//! table and temporarily injecting a stylesheet into the host document.
//! The injection is modeled as a scoped resource: `PrintStyleScope`
//! attaches the stylesheet and detaches it on drop, so the host is
//! always restored once the print operation finishes.

use log::debug;

/// px -> mm conversion used for the printed page size.
const PX_TO_MM: f64 = 0.2636;

/// Extra page size beyond the table, in mm.
const PAGE_PADDING_MM: f64 = 30.0;

/// Page margin, in mm.
const PAGE_MARGIN_MM: f64 = 10.0;

/// Builds the `@media print` stylesheet sizing the page to a table of
/// the given pixel dimensions.
pub fn page_styles_for_print(width_px: f64, height_px: f64) -> String {
    let width_mm = width_px * PX_TO_MM + PAGE_PADDING_MM;
    let height_mm = height_px * PX_TO_MM + PAGE_PADDING_MM;
    format!(
        "@media print {{\n\
         \x20 html, body {{\n\
         \x20   background-color: #ffffff;\n\
         \x20 }}\n\
         \x20 @page {{\n\
         \x20   size: {:.1}mm {:.1}mm;\n\
         \x20   margin: {}mm;\n\
         \x20 }}\n\
         }}\n",
        width_mm, height_mm, PAGE_MARGIN_MM
    )
}

/// Handle of an attached stylesheet, issued by the host.
pub type StyleId = usize;

/// Where temporary print stylesheets get attached. In a real frontend
/// this is backed by the document head; tests use an in-memory host.
pub trait StyleHost {
    fn attach_style(&mut self, css: &str) -> StyleId;
    fn detach_style(&mut self, id: StyleId);
}

/// Scoped print stylesheet: attached on construction, detached when the
/// scope is dropped, regardless of how the print operation went.
pub struct PrintStyleScope<'a, H: StyleHost> {
    host: &'a mut H,
    id: Option<StyleId>,
}

impl<'a, H: StyleHost> PrintStyleScope<'a, H> {
    pub fn attach(host: &'a mut H, width_px: f64, height_px: f64) -> Self {
        let css = page_styles_for_print(width_px, height_px);
        let id = host.attach_style(&css);
        debug!("attached print stylesheet {}", id);
        PrintStyleScope { host, id: Some(id) }
    }

    /// Detaches the stylesheet early, before the scope ends.
    pub fn detach(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.host.detach_style(id);
            debug!("detached print stylesheet {}", id);
        }
    }
}

impl<H: StyleHost> Drop for PrintStyleScope<'_, H> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeHost {
        attached: Vec<String>,
        active: usize,
    }

    impl StyleHost for FakeHost {
        fn attach_style(&mut self, css: &str) -> StyleId {
            self.attached.push(css.to_string());
            self.active += 1;
            self.attached.len() - 1
        }

        fn detach_style(&mut self, _id: StyleId) {
            self.active -= 1;
        }
    }

    #[test]
    fn test_page_styles_size_and_margin() {
        let css = page_styles_for_print(1000.0, 500.0);
        // 1000 * 0.2636 + 30 = 293.6, 500 * 0.2636 + 30 = 161.8
        assert!(css.contains("size: 293.6mm 161.8mm;"));
        assert!(css.contains("margin: 10mm;"));
        assert!(css.contains("@media print"));
    }

    #[test]
    fn test_scope_detaches_on_drop() {
        let mut host = FakeHost::default();
        {
            let _scope = PrintStyleScope::attach(&mut host, 800.0, 600.0);
        }
        assert_eq!(host.active, 0);
        assert_eq!(host.attached.len(), 1);
    }

    #[test]
    fn test_explicit_detach_releases_once() {
        let mut host = FakeHost::default();
        let scope = PrintStyleScope::attach(&mut host, 800.0, 600.0);
        scope.detach();
        assert_eq!(host.active, 0);
    }
}
