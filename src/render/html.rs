//! HTML output
//!
//! Turns a [`Page`] into one self-contained document. Maps are drawn by
//! Leaflet in the browser; everything else is static markup.

use std::fmt::Write;

use super::page::{Block, MetricCell, Page, Table, Tab};

const LEAFLET_CSS: &str = "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css";
const LEAFLET_JS: &str = "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js";

const STYLE: &str = r#"
body { margin: 0; font-family: "Source Sans Pro", system-ui, sans-serif; color: #262730; display: flex; min-height: 100vh; }
aside { width: 260px; background: #f0f2f6; padding: 1.5rem 1rem; box-sizing: border-box; }
main { flex: 1; max-width: 960px; padding: 2rem 3rem; box-sizing: border-box; }
h1 { font-size: 2.2rem; margin: 0 0 1rem; }
h3 { margin: 1.5rem 0 0.75rem; }
hr { border: none; border-top: 1px solid #e6e9ef; margin: 1.5rem 0; }
.banner { border-radius: 0.5rem; padding: 0.75rem 1rem; margin: 0.5rem 0; }
.banner-error { background: #ffe2e2; color: #7d353b; }
.banner-warning { background: #fffce7; color: #926c05; }
.banner-info { background: #e6f0ff; color: #004280; }
.banner-success { background: #dff5e3; color: #177233; }
.metrics { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; }
.metric-label { font-size: 0.875rem; color: #555867; }
.metric-value { font-size: 2.25rem; }
pre { background: #f6f8fa; padding: 0.75rem; overflow-x: auto; font-size: 0.8rem; }
table { border-collapse: collapse; font-size: 0.85rem; margin: 0.5rem 0; }
th, td { border: 1px solid #e6e9ef; padding: 0.25rem 0.5rem; text-align: right; }
th { background: #fafafa; }
.tabs > input { display: none; }
.tabs > label { display: inline-block; padding: 0.5rem 1rem; cursor: pointer; border-bottom: 2px solid transparent; }
.tabs > input:checked + label { border-bottom-color: #ff4b4b; color: #ff4b4b; }
.tab-panel { display: none; padding-top: 1rem; }
.map { border: 1px solid #e6e9ef; }
.legend { background: #fff; padding: 6px 8px; font-size: 12px; line-height: 18px; }
.legend i { width: 18px; height: 18px; float: left; margin-right: 6px; opacity: 0.7; }
"#;

const MAP_SCRIPT: &str = r#"
function renderWeatherMap(id, spec) {
  var map = L.map(id).setView(spec.center, spec.zoom);
  L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
    attribution: '&copy; OpenStreetMap contributors'
  }).addTo(map);
  var c = spec.choropleth;
  if (c) {
    var layer = L.geoJSON(c.data, {
      style: function (f) {
        return { fillColor: f.properties.fill, fillOpacity: c.fill_opacity, color: 'black', weight: 1, opacity: c.line_opacity };
      },
      onEachFeature: function (f, l) {
        l.on('mouseover', function () { l.setStyle({ weight: 3, fillOpacity: 0.9 }); });
        l.on('mouseout', function () { layer.resetStyle(l); });
      }
    }).addTo(map);
    var legend = L.control({ position: 'topright' });
    legend.onAdd = function () {
      var div = L.DomUtil.create('div', 'legend');
      div.innerHTML = '<strong>' + c.legend + '</strong><br>';
      for (var i = 0; i < c.colors.length; i++) {
        div.innerHTML += '<i style="background:' + c.colors[i] + '"></i>' +
          c.thresholds[i].toFixed(1) + ' &ndash; ' + c.thresholds[i + 1].toFixed(1) + '<br>';
      }
      return div;
    };
    legend.addTo(map);
  }
  spec.tooltips.forEach(function (t) {
    L.geoJSON(t.geometry, {
      style: function () { return { fillColor: 'transparent', color: 'black', weight: 1, fillOpacity: 0 }; }
    }).bindTooltip(t.text).addTo(map);
  });
}
"#;

/// Escape text for HTML content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// JSON that is safe to embed in a `<script>` element
fn script_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

struct Renderer {
    out: String,
    /// Counter for unique element ids
    next_id: usize,
}

impl Renderer {
    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn blocks(&mut self, blocks: &[Block]) {
        for block in blocks {
            self.block(block);
        }
    }

    fn block(&mut self, block: &Block) {
        // Writing into a String cannot fail
        let out = &mut self.out;
        match block {
            Block::Title(text) => {
                let _ = write!(out, "<h1>{}</h1>", escape(text));
            }
            Block::Subheader(text) => {
                let _ = write!(out, "<h3>{}</h3>", escape(text));
            }
            Block::Text(text) => {
                let _ = write!(out, "<p>{}</p>", escape(text));
            }
            Block::Rule => out.push_str("<hr>"),
            Block::Banner { level, message } => {
                let _ = write!(
                    out,
                    r#"<div class="banner {}">{}</div>"#,
                    level.css_class(),
                    escape(message)
                );
            }
            Block::Code(text) => {
                let _ = write!(out, "<pre><code>{}</code></pre>", escape(text));
            }
            Block::Json(value) => {
                let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
                let _ = write!(out, "<pre><code>{}</code></pre>", escape(&pretty));
            }
            Block::Metrics(cells) => self.metrics(cells),
            Block::Chart(chart) => match chart.to_svg() {
                Ok(svg) => {
                    let _ = write!(out, r#"<div class="chart">{}</div>"#, svg);
                }
                Err(e) => {
                    let _ = write!(
                        out,
                        r#"<div class="banner banner-error">❌ Error displaying chart: {}</div>"#,
                        escape(&e.to_string())
                    );
                }
            },
            Block::Map(map) => {
                let id = self.id("map");
                let _ = write!(
                    self.out,
                    r#"<div id="{id}" class="map" style="width:{w}px;height:{h}px"></div><script>renderWeatherMap("{id}", {spec});</script>"#,
                    id = id,
                    w = map.width,
                    h = map.height,
                    spec = script_json(&map.to_json())
                );
            }
            Block::Table(table) => self.table(table),
            Block::Tabs(tabs) => self.tabs(tabs),
            Block::DebugToggle { checked } => {
                let _ = write!(
                    out,
                    r#"<form method="get"><label><input type="checkbox" name="debug" value="true" onchange="this.form.submit()"{}> 🔧 Debug Mode</label></form>"#,
                    if *checked { " checked" } else { "" }
                );
            }
        }
    }

    fn metrics(&mut self, cells: &[MetricCell]) {
        self.out.push_str(r#"<div class="metrics">"#);
        for cell in cells {
            let _ = match cell {
                MetricCell::Value { label, value } => write!(
                    self.out,
                    r#"<div><div class="metric-label">{}</div><div class="metric-value">{}</div></div>"#,
                    escape(label),
                    escape(value)
                ),
                MetricCell::Error(message) => write!(
                    self.out,
                    r#"<div class="banner banner-error">{}</div>"#,
                    escape(message)
                ),
            };
        }
        self.out.push_str("</div>");
    }

    fn table(&mut self, table: &Table) {
        self.out.push_str("<table><thead><tr>");
        for header in &table.headers {
            let _ = write!(self.out, "<th>{}</th>", escape(header));
        }
        self.out.push_str("</tr></thead><tbody>");
        for row in &table.rows {
            self.out.push_str("<tr>");
            for cell in row {
                let _ = write!(self.out, "<td>{}</td>", escape(cell));
            }
            self.out.push_str("</tr>");
        }
        self.out.push_str("</tbody></table>");
    }

    fn tabs(&mut self, tabs: &[Tab]) {
        let group = self.id("tabs");
        let mut css = String::new();

        self.out.push_str(r#"<div class="tabs">"#);
        for (idx, tab) in tabs.iter().enumerate() {
            let _ = write!(
                self.out,
                r#"<input type="radio" name="{g}" id="{g}-{i}"{checked}><label for="{g}-{i}">{label}</label>"#,
                g = group,
                i = idx,
                checked = if idx == 0 { " checked" } else { "" },
                label = escape(&tab.label)
            );
            let _ = write!(
                css,
                "#{g}-{i}:checked ~ #{g}-panel-{i} {{ display: block; }}",
                g = group,
                i = idx
            );
        }
        for (idx, tab) in tabs.iter().enumerate() {
            let _ = write!(self.out, r#"<div class="tab-panel" id="{}-panel-{}">"#, group, idx);
            self.blocks(&tab.blocks);
            self.out.push_str("</div>");
        }
        let _ = write!(self.out, "<style>{}</style></div>", css);
    }
}

fn contains_map(blocks: &[Block]) -> bool {
    blocks.iter().any(|b| match b {
        Block::Map(_) => true,
        Block::Tabs(tabs) => tabs.iter().any(|t| contains_map(&t.blocks)),
        _ => false,
    })
}

/// Render a full HTML document
pub fn render_page(page: &Page) -> String {
    let with_map = contains_map(&page.body);

    let mut renderer = Renderer {
        out: String::with_capacity(16 * 1024),
        next_id: 0,
    };

    let _ = write!(
        renderer.out,
        r#"<!doctype html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{}</title><style>{}</style>"#,
        escape(&page.title),
        STYLE
    );
    if with_map {
        let _ = write!(
            renderer.out,
            r#"<link rel="stylesheet" href="{}"><script src="{}"></script><script>{}</script>"#,
            LEAFLET_CSS, LEAFLET_JS, MAP_SCRIPT
        );
    }
    renderer.out.push_str("</head><body>");

    if !page.sidebar.is_empty() {
        renderer.out.push_str("<aside>");
        renderer.blocks(&page.sidebar);
        renderer.out.push_str("</aside>");
    }

    renderer.out.push_str("<main>");
    renderer.blocks(&page.body);
    renderer.out.push_str("</main></body></html>");

    renderer.out
}
