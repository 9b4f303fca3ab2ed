use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use panloc_core::GeographicPoint;

/// Renders a set of known locations and a localization estimate into a
/// viewable artifact at a path.
///
/// Rendering is fire-and-forget: the pipelines log failures and carry on,
/// and the localization result never depends on the artifact.
pub trait MapRenderer {
    fn render(
        &self,
        known: &[GeographicPoint],
        estimate: GeographicPoint,
        path: &Path,
    ) -> io::Result<()>;
}

/// Writes a self-contained HTML document plotting the known panorama
/// locations (red) and the estimated camera location (blue).
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlMapRenderer;

impl MapRenderer for HtmlMapRenderer {
    fn render(
        &self,
        known: &[GeographicPoint],
        estimate: GeographicPoint,
        path: &Path,
    ) -> io::Result<()> {
        let mut file = File::create(path)?;
        writeln!(file, "<!DOCTYPE html>")?;
        writeln!(file, "<html><head><title>panloc estimate</title></head><body>")?;
        writeln!(file, "<h1>Localization estimate</h1>")?;
        writeln!(file, "<ul>")?;
        for location in known {
            writeln!(
                file,
                "<li style=\"color:#FF0000\">panorama at {:.6}, {:.6}</li>",
                location.latitude, location.longitude
            )?;
        }
        writeln!(
            file,
            "<li style=\"color:#0000FF\">estimate at {:.6}, {:.6}</li>",
            estimate.latitude, estimate.longitude
        )?;
        writeln!(file, "</ul>")?;
        writeln!(file, "<script>")?;
        writeln!(
            file,
            "const markers = {{\"panoramas\": [{}], \"estimate\": [{:.8}, {:.8}]}};",
            known
                .iter()
                .map(|location| format!("[{:.8}, {:.8}]", location.latitude, location.longitude))
                .collect::<Vec<_>>()
                .join(", "),
            estimate.latitude,
            estimate.longitude
        )?;
        writeln!(file, "</script>")?;
        writeln!(file, "</body></html>")?;
        Ok(())
    }
}
