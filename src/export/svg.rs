//! SVG preview writer.
//!
//! One fixed style per layer: top copper red, bottom copper blue,
//! silkscreen white on a dark board. Y is flipped so the board reads the
//! way it is built (origin bottom-left).

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::board::{Board, Layer};
use crate::error::ExportError;

/// Stroke colour for a layer.
const fn layer_colour(layer: Layer) -> &'static str {
    match layer {
        Layer::TopCopper => "#c87137",
        Layer::BottomCopper => "#3f72af",
        Layer::TopSilk => "#f0f0f0",
    }
}

/// Renders the board as an SVG document.
#[must_use]
pub fn render(board: &Board) -> String {
    let (width, height) = board.size();
    let mut out = String::new();

    // Header and dark substrate. The Y-flip transform keeps the document
    // in board coordinates.
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}mm" height="{height}mm" viewBox="0 0 {width} {height}">"#
    );
    let _ = writeln!(out, r#"<g transform="translate(0 {height}) scale(1 -1)">"#);
    if board.is_outlined() {
        let _ = writeln!(
            out,
            r##"<rect x="0" y="0" width="{width}" height="{height}" fill="#1a3a1a" stroke="#c8c8c8" stroke-width="0.2"/>"##
        );
    }

    for track in board.tracks() {
        let points: Vec<String> = track
            .points
            .iter()
            .map(|p| format!("{:.3},{:.3}", p.x, p.y))
            .collect();
        let _ = writeln!(
            out,
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{:.3}" stroke-linecap="round"/>"#,
            points.join(" "),
            layer_colour(track.layer),
            track.width
        );
    }

    for via in board.vias() {
        let _ = writeln!(
            out,
            r##"<circle cx="{:.3}" cy="{:.3}" r="{:.3}" fill="#d4d4d4"/><circle cx="{:.3}" cy="{:.3}" r="{:.3}" fill="#1a3a1a"/>"##,
            via.at.x,
            via.at.y,
            via.diameter / 2.0,
            via.at.x,
            via.at.y,
            via.hole / 2.0
        );
    }

    for hole in board.holes() {
        let _ = writeln!(
            out,
            r##"<circle cx="{:.3}" cy="{:.3}" r="{:.3}" fill="none" stroke="#c8c8c8" stroke-width="0.2"/>"##,
            hole.at.x,
            hole.at.y,
            hole.drill / 2.0
        );
    }

    for thermal in board.thermals() {
        let _ = writeln!(
            out,
            r#"<circle cx="{:.3}" cy="{:.3}" r="{:.3}" fill="none" stroke="{}" stroke-width="0.3"/>"#,
            thermal.at.x,
            thermal.at.y,
            thermal.spoke / 2.0,
            layer_colour(thermal.layer)
        );
    }

    // Labels render unflipped so the text stays upright.
    let _ = writeln!(out, "</g>");
    for label in board.labels() {
        let _ = writeln!(
            out,
            r##"<text x="{:.3}" y="{:.3}" font-size="1.2" fill="#f0f0f0" font-family="monospace">{}</text>"##,
            label.at.x,
            height - label.at.y,
            escape_text(&label.text)
        );
    }

    let _ = writeln!(out, "</svg>");
    out
}

/// Writes the SVG preview to `path`.
///
/// # Errors
///
/// Returns [`ExportError::FileWrite`] if the file cannot be written.
pub fn write(board: &Board, path: &Path) -> Result<(), ExportError> {
    let document = render(board);
    fs::write(path, document).map_err(|e| ExportError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(path = %path.display(), "SVG preview written");
    Ok(())
}

/// Escapes the XML-special characters that can appear in pad names.
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
