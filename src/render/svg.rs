//! SVG serialization of label scenes.
//!
//! The output is an SVG 1.2 Tiny document sized in millimeters. Formatting
//! is fully deterministic: identical scenes produce identical bytes.

use std::fmt::Write;

use crate::scene::{Element, ElementId, Scene, FONT_FAMILY, FONT_WEIGHT};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Serializes a scene to an SVG document.
pub fn scene_to_svg(scene: &Scene) -> String {
    let mut svg = String::new();
    let (w, h) = (scene.width(), scene.height());

    writeln!(svg, "<?xml version=\"1.0\" encoding=\"utf-8\"?>").expect("write to string");
    writeln!(
        svg,
        "<svg xmlns=\"{}\" baseProfile=\"tiny\" version=\"1.2\" viewBox=\"0 0 {} {}\" width=\"{}mm\" height=\"{}mm\" style=\"background-color: white\" xml:space=\"preserve\">",
        SVG_NAMESPACE, w, h, w, h
    )
    .expect("write to string");

    for element in scene.elements() {
        let id = element.id();
        match element {
            Element::Background => {
                writeln!(
                    svg,
                    "  <rect id=\"{}\" x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"#fff\"/>",
                    id, w, h
                )
                .expect("write to string");
            }
            Element::Barcode { transform, grid } => {
                writeln!(svg, "  <g id=\"{}\" transform=\"{}\">", id, transform)
                    .expect("write to string");
                writeln!(
                    svg,
                    "    <path d=\"M0 0h{}v{}H0z\" fill=\"#fff\"/>",
                    grid.width(),
                    grid.height()
                )
                .expect("write to string");
                let mut d = String::new();
                for (x, y) in grid.dark_modules() {
                    write!(d, "M{} {}h1v1h-1z", x, y).expect("write to string");
                }
                writeln!(svg, "    <path d=\"{}\"/>", d).expect("write to string");
                writeln!(svg, "  </g>").expect("write to string");
            }
            Element::Dot { center, radius } => {
                writeln!(
                    svg,
                    "  <circle id=\"{}\" cx=\"{}\" cy=\"{}\" r=\"{}\"/>",
                    id, center.x, center.y, radius
                )
                .expect("write to string");
            }
            Element::Text(group) => {
                writeln!(svg, "  <g id=\"{}\" transform=\"{}\">", id, group.transform)
                    .expect("write to string");
                for (i, line) in group.lines.iter().enumerate() {
                    writeln!(
                        svg,
                        "    <text id=\"{}\" x=\"{}\" y=\"{}\" font-family=\"{}\" text-anchor=\"{}\" font-style=\"normal\" font-weight=\"{}\" font-size=\"{}\">{}</text>",
                        ElementId::TextLine(i),
                        line.x,
                        line.y,
                        FONT_FAMILY,
                        group.anchor.as_str(),
                        FONT_WEIGHT,
                        group.font_size,
                        xml_escape(&line.content)
                    )
                    .expect("write to string");
                }
                writeln!(svg, "  </g>").expect("write to string");
            }
        }
    }

    writeln!(svg, "</svg>").expect("write to string");
    svg
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
