// src/graph/gexf.rs
// =============================================================================
// Serializes a Network as GEXF 1.2 (https://gexf.net), the format Gephi and
// NetworkX read.
//
// Layout:
//   <gexf>
//     <graph defaultedgetype="directed">
//       <attributes class="node"> one <attribute> per attribute name </attributes>
//       <attributes class="edge"> ... </attributes>
//       <nodes> <node id label> <attvalues/> </node> ... </nodes>
//       <edges> <edge id source target> <attvalues/> </edge> ... </edges>
//     </graph>
//   </gexf>
//
// All attributes are declared as strings. Attribute ids are their position
// in the declaration table.
// =============================================================================

use indexmap::IndexSet;
use std::io::{self, Write};

use super::network::{Attributes, Network};

/// Writes `network` as a GEXF document.
pub fn write<W: Write>(network: &Network, out: &mut W) -> io::Result<()> {
    let node_keys = attribute_keys(network.nodes().map(|node| &node.attributes));
    let edge_keys = attribute_keys(network.edges().map(|(_, _, attrs)| attrs));

    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(out, r#"<gexf xmlns="http://www.gexf.net/1.2draft" version="1.2">"#)?;
    writeln!(out, "  <meta>")?;
    writeln!(out, "    <creator>{}</creator>", env!("CARGO_PKG_NAME"))?;
    writeln!(out, "  </meta>")?;
    writeln!(out, r#"  <graph defaultedgetype="directed" mode="static">"#)?;

    write_declarations(out, "node", &node_keys)?;
    write_declarations(out, "edge", &edge_keys)?;

    writeln!(out, "    <nodes>")?;
    for node in network.nodes() {
        let id = escape(&node.id);
        if node.attributes.is_empty() {
            writeln!(out, r#"      <node id="{}" label="{}" />"#, id, id)?;
        } else {
            writeln!(out, r#"      <node id="{}" label="{}">"#, id, id)?;
            write_values(out, &node_keys, &node.attributes)?;
            writeln!(out, "      </node>")?;
        }
    }
    writeln!(out, "    </nodes>")?;

    writeln!(out, "    <edges>")?;
    for (n, (from, to, attrs)) in network.edges().enumerate() {
        let open = format!(
            r#"      <edge id="{}" source="{}" target="{}""#,
            n,
            escape(from),
            escape(to)
        );
        if attrs.is_empty() {
            writeln!(out, "{} />", open)?;
        } else {
            writeln!(out, "{}>", open)?;
            write_values(out, &edge_keys, attrs)?;
            writeln!(out, "      </edge>")?;
        }
    }
    writeln!(out, "    </edges>")?;

    writeln!(out, "  </graph>")?;
    writeln!(out, "</gexf>")?;
    Ok(())
}

// Collects attribute names in first-seen order
fn attribute_keys<'a>(all: impl Iterator<Item = &'a Attributes>) -> IndexSet<&'a str> {
    all.flat_map(|attrs| attrs.keys().map(String::as_str)).collect()
}

fn write_declarations<W: Write>(out: &mut W, class: &str, keys: &IndexSet<&str>) -> io::Result<()> {
    if keys.is_empty() {
        return Ok(());
    }
    writeln!(out, r#"    <attributes class="{}" mode="static">"#, class)?;
    for (id, key) in keys.iter().enumerate() {
        writeln!(
            out,
            r#"      <attribute id="{}" title="{}" type="string" />"#,
            id,
            escape(key)
        )?;
    }
    writeln!(out, "    </attributes>")?;
    Ok(())
}

fn write_values<W: Write>(out: &mut W, keys: &IndexSet<&str>, attrs: &Attributes) -> io::Result<()> {
    writeln!(out, "        <attvalues>")?;
    for (key, value) in attrs {
        // every key was collected into `keys` beforehand
        if let Some(id) = keys.get_index_of(key.as_str()) {
            writeln!(
                out,
                r#"          <attvalue for="{}" value="{}" />"#,
                id,
                escape(value)
            )?;
        }
    }
    writeln!(out, "        </attvalues>")?;
    Ok(())
}

// XML attribute escaping
fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_string(network: &Network) -> String {
        let mut buf = Vec::new();
        write(network, &mut buf).expect("writing to a Vec cannot fail");
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_directed_graph_with_attributes() {
        let mut network = Network::new();
        network.add_node("rocket", &[("organization", "acme")]);
        network.add_edge("alice", "rocket", &[("organization", "acme")]);

        let xml = to_string(&network);

        assert!(xml.contains(r#"defaultedgetype="directed""#));
        assert!(xml.contains(r#"<attributes class="node" mode="static">"#));
        assert!(xml.contains(r#"<attribute id="0" title="organization" type="string" />"#));
        assert!(xml.contains(r#"<node id="rocket" label="rocket">"#));
        assert!(xml.contains(r#"<node id="alice" label="alice" />"#));
        assert!(xml.contains(r#"<edge id="0" source="alice" target="rocket">"#));
        assert!(xml.contains(r#"<attvalue for="0" value="acme" />"#));
    }

    #[test]
    fn test_escapes_identifiers() {
        let mut network = Network::new();
        network.add_node(r#"a&b "c""#, &[]);

        let xml = to_string(&network);
        assert!(xml.contains(r#"id="a&amp;b &quot;c&quot;""#));
    }

    #[test]
    fn test_empty_network() {
        let xml = to_string(&Network::new());
        assert!(xml.contains("<nodes>"));
        assert!(xml.contains("<edges>"));
        assert!(!xml.contains("<attributes"));
    }
}
