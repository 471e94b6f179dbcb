//! Minimal SVG output for the comparison charts.
//!
//! The charts are simple enough (axes, polylines, bars, a table grid) that
//! the markup is written directly, the same way the raw log and summary
//! formats are.

use std::fs;
use std::io;
use std::path::Path;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;
const TICKS: usize = 5;

/// One plotted line: a label for the legend, a stroke color, and the data
/// points in chart coordinates.
#[derive(Debug, Clone)]
pub struct PlotSeries {
    pub label: String,
    pub color: String,
    pub points: Vec<(f64, f64)>,
}

struct Frame {
    x_max: f64,
    y_max: f64,
}

impl Frame {
    fn over(series: &[PlotSeries]) -> Frame {
        let mut x_max = 1.0f64;
        let mut y_max = 1.0f64;
        for s in series {
            for &(x, y) in &s.points {
                x_max = x_max.max(x);
                y_max = y_max.max(y);
            }
        }
        Frame { x_max, y_max }
    }

    fn sx(&self, x: f64) -> f64 {
        MARGIN_LEFT + x / self.x_max * (WIDTH - MARGIN_LEFT - MARGIN_RIGHT)
    }

    fn sy(&self, y: f64) -> f64 {
        HEIGHT - MARGIN_BOTTOM - y / self.y_max * (HEIGHT - MARGIN_TOP - MARGIN_BOTTOM)
    }
}

pub fn line_chart(
    path: &Path,
    title: &str,
    x_label: &str,
    y_label: &str,
    series: &[PlotSeries],
) -> io::Result<()> {
    let frame = Frame::over(series);
    let mut out = header(title);
    axes(&mut out, &frame, x_label, y_label, true);

    for s in series {
        let points = s
            .points
            .iter()
            .map(|&(x, y)| format!("{:.1},{:.1}", frame.sx(x), frame.sy(y)))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!(
            "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"0.7\" points=\"{}\"/>\n",
            esc(&s.color),
            points
        ));
        for &(x, y) in &s.points {
            out.push_str(&format!(
                "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"2\" fill=\"{}\"/>\n",
                frame.sx(x),
                frame.sy(y),
                esc(&s.color)
            ));
        }
    }

    for (i, s) in series.iter().enumerate() {
        out.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" fill=\"{}\" font-size=\"13\">{}</text>\n",
            MARGIN_LEFT + 10.0,
            MARGIN_TOP + 16.0 + i as f64 * 18.0,
            esc(&s.color),
            esc(&s.label)
        ));
    }

    out.push_str("</svg>\n");
    fs::write(path, out)
}

pub fn bar_chart(
    path: &Path,
    title: &str,
    categories: &[&str],
    values: &[usize],
) -> io::Result<()> {
    let y_max = values.iter().copied().max().unwrap_or(0).max(1) as f64;
    let frame = Frame { x_max: 1.0, y_max };
    let mut out = header(title);
    axes(&mut out, &frame, "", "Amount", false);

    let plot_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let slot = plot_width / categories.len().max(1) as f64;
    let bar_width = slot * 0.6;
    for (i, (category, &value)) in categories.iter().zip(values).enumerate() {
        let x = MARGIN_LEFT + i as f64 * slot + (slot - bar_width) / 2.0;
        let top = frame.sy(value as f64);
        out.push_str(&format!(
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"steelblue\"/>\n",
            x,
            top,
            bar_width,
            (HEIGHT - MARGIN_BOTTOM) - top
        ));
        out.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"13\">{}</text>\n",
            x + bar_width / 2.0,
            top - 6.0,
            value
        ));
        out.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"13\">{}</text>\n",
            x + bar_width / 2.0,
            HEIGHT - MARGIN_BOTTOM + 20.0,
            esc(category)
        ));
    }

    out.push_str("</svg>\n");
    fs::write(path, out)
}

/// Renders a labeled grid, row labels on the left and column labels on top.
pub fn table_image(
    path: &Path,
    title: &str,
    col_labels: &[&str],
    row_labels: &[&str],
    cells: &[Vec<String>],
) -> io::Result<()> {
    const CELL_W: f64 = 150.0;
    const LABEL_W: f64 = 180.0;
    const CELL_H: f64 = 28.0;
    const TOP: f64 = 50.0;
    const LEFT: f64 = 20.0;

    let width = LEFT * 2.0 + LABEL_W + CELL_W * col_labels.len() as f64;
    let height = TOP + CELL_H * (row_labels.len() + 1) as f64 + 20.0;
    let mut out = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.0}\" height=\"{height:.0}\" \
         font-family=\"sans-serif\">\n<text x=\"{LEFT}\" y=\"28\" font-size=\"16\">{}</text>\n",
        esc(title)
    );

    for (c, label) in col_labels.iter().enumerate() {
        let x = LEFT + LABEL_W + c as f64 * CELL_W;
        out.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"13\" font-weight=\"bold\">{}</text>\n",
            x + 8.0,
            TOP + CELL_H - 9.0,
            esc(label)
        ));
    }
    for (r, label) in row_labels.iter().enumerate() {
        let y = TOP + (r + 1) as f64 * CELL_H;
        out.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"13\">{}</text>\n",
            LEFT + 8.0,
            y + CELL_H - 9.0,
            esc(label)
        ));
        let row = cells.get(r);
        for c in 0..col_labels.len() {
            let x = LEFT + LABEL_W + c as f64 * CELL_W;
            let text = row.and_then(|cols| cols.get(c)).cloned().unwrap_or_default();
            out.push_str(&format!(
                "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{CELL_W}\" height=\"{CELL_H}\" \
                 fill=\"none\" stroke=\"#999\"/>\n",
                x, y
            ));
            out.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"13\" text-anchor=\"end\">{}</text>\n",
                x + CELL_W - 8.0,
                y + CELL_H - 9.0,
                esc(&text)
            ));
        }
    }

    out.push_str("</svg>\n");
    fs::write(path, out)
}

fn header(title: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH:.0}\" height=\"{HEIGHT:.0}\" \
         font-family=\"sans-serif\">\n<text x=\"{:.1}\" y=\"28\" font-size=\"16\" \
         text-anchor=\"middle\">{}</text>\n",
        WIDTH / 2.0,
        esc(title)
    )
}

fn axes(out: &mut String, frame: &Frame, x_label: &str, y_label: &str, x_ticks: bool) {
    out.push_str(&format!(
        "<line x1=\"{MARGIN_LEFT}\" y1=\"{MARGIN_TOP}\" x2=\"{MARGIN_LEFT}\" y2=\"{:.1}\" stroke=\"black\"/>\n",
        HEIGHT - MARGIN_BOTTOM
    ));
    out.push_str(&format!(
        "<line x1=\"{MARGIN_LEFT}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"black\"/>\n",
        HEIGHT - MARGIN_BOTTOM,
        WIDTH - MARGIN_RIGHT,
        HEIGHT - MARGIN_BOTTOM
    ));

    for i in 0..=TICKS {
        let fraction = i as f64 / TICKS as f64;
        let y_value = frame.y_max * fraction;
        let y = frame.sy(y_value);
        out.push_str(&format!(
            "<line x1=\"{:.1}\" y1=\"{y:.1}\" x2=\"{MARGIN_LEFT}\" y2=\"{y:.1}\" stroke=\"black\"/>\n",
            MARGIN_LEFT - 5.0
        ));
        out.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"11\">{}</text>\n",
            MARGIN_LEFT - 9.0,
            y + 4.0,
            fmt_tick(y_value)
        ));

        if x_ticks {
            let x_value = frame.x_max * fraction;
            let x = frame.sx(x_value);
            out.push_str(&format!(
                "<line x1=\"{x:.1}\" y1=\"{:.1}\" x2=\"{x:.1}\" y2=\"{:.1}\" stroke=\"black\"/>\n",
                HEIGHT - MARGIN_BOTTOM,
                HEIGHT - MARGIN_BOTTOM + 5.0
            ));
            out.push_str(&format!(
                "<text x=\"{x:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"11\">{}</text>\n",
                HEIGHT - MARGIN_BOTTOM + 18.0,
                fmt_tick(x_value)
            ));
        }
    }

    if !x_label.is_empty() {
        out.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"13\">{}</text>\n",
            (MARGIN_LEFT + WIDTH - MARGIN_RIGHT) / 2.0,
            HEIGHT - 14.0,
            esc(x_label)
        ));
    }
    if !y_label.is_empty() {
        out.push_str(&format!(
            "<text x=\"18\" y=\"{:.1}\" font-size=\"13\" transform=\"rotate(-90 18 {:.1})\" \
             text-anchor=\"middle\">{}</text>\n",
            HEIGHT / 2.0,
            HEIGHT / 2.0,
            esc(y_label)
        ));
    }
}

fn fmt_tick(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 && v.abs() < 1e12 {
        format!("{}", v.round() as i64)
    } else {
        format!("{v:.1}")
    }
}

fn esc(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
