//! Loader for the hierarchical XML image format.
//!
//! The root element names the image; nested `<directory>` and `<file>`
//! elements declare entries, each optionally carrying `owner`/`group`
//! attributes. A `<file>` body is taken verbatim unless tagged
//! `encoding="base64"`. Directories are registered before their children
//! are walked, so a node's parent always exists by construction.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::collections::HashMap;

use crate::error::LoadError;
use crate::node::{NodeKind, VfsNode};
use crate::store::DEFAULT_GROUP;

/// A fully parsed image, ready to be swapped into a store.
pub(crate) struct ParsedImage {
    pub name: String,
    pub nodes: HashMap<String, VfsNode>,
}

pub(crate) fn parse_image(xml: &str, user: &str) -> Result<ParsedImage, LoadError> {
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| LoadError::Malformed(e.to_string()))?;
    let root = doc.root_element();

    let name = root.attribute("name").unwrap_or("vfs").to_string();
    let mut nodes = HashMap::new();
    parse_children(root, "/", user, &mut nodes)?;

    Ok(ParsedImage { name, nodes })
}

fn parse_children(
    parent: roxmltree::Node<'_, '_>,
    dir: &str,
    user: &str,
    nodes: &mut HashMap<String, VfsNode>,
) -> Result<(), LoadError> {
    for child in parent.children().filter(roxmltree::Node::is_element) {
        let tag = child.tag_name().name();
        let name = child.attribute("name").ok_or_else(|| {
            LoadError::Malformed(format!("<{tag}> element without a name attribute"))
        })?;
        let owner = child.attribute("owner").unwrap_or(user).to_string();
        let group = child.attribute("group").unwrap_or(DEFAULT_GROUP).to_string();
        let path = join(dir, name);

        match tag {
            "file" => {
                let content = file_content(child)?;
                nodes.insert(
                    path.clone(),
                    VfsNode {
                        path,
                        name: name.to_string(),
                        kind: NodeKind::File,
                        content: Some(content),
                        owner,
                        group,
                    },
                );
            }
            "directory" => {
                nodes.insert(
                    path.clone(),
                    VfsNode {
                        path: path.clone(),
                        name: name.to_string(),
                        kind: NodeKind::Directory,
                        content: None,
                        owner,
                        group,
                    },
                );
                parse_children(child, &path, user, nodes)?;
            }
            other => {
                return Err(LoadError::Malformed(format!("unexpected element <{other}>")));
            }
        }
    }
    Ok(())
}

fn file_content(node: roxmltree::Node<'_, '_>) -> Result<String, LoadError> {
    let raw = node.text().unwrap_or("");

    if node.attribute("encoding") == Some("base64") {
        // XML pretty-printing pads bodies with whitespace the codec rejects
        let packed: String = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        let bytes = BASE64
            .decode(packed)
            .map_err(|e| LoadError::Malformed(format!("invalid base64 body: {e}")))?;
        String::from_utf8(bytes)
            .map_err(|e| LoadError::Malformed(format!("base64 body is not UTF-8: {e}")))
    } else {
        Ok(raw.to_string())
    }
}

fn join(dir: &str, name: &str) -> String {
    if dir == "/" {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_directories_and_files() {
        let xml = r#"
            <vfs name="demo">
                <directory name="docs">
                    <file name="readme.txt">hello</file>
                </directory>
                <file name="top.txt">top</file>
            </vfs>
        "#;
        let image = parse_image(xml, "tester").unwrap();
        assert_eq!(image.name, "demo");
        assert_eq!(image.nodes.len(), 3);
        assert!(image.nodes["/docs"].is_dir());
        assert_eq!(
            image.nodes["/docs/readme.txt"].content.as_deref(),
            Some("hello")
        );
        assert_eq!(image.nodes["/top.txt"].name, "top.txt");
    }

    #[test]
    fn owner_and_group_default_to_session_user() {
        let xml = r#"<vfs><file name="a.txt">x</file></vfs>"#;
        let image = parse_image(xml, "tester").unwrap();
        let node = &image.nodes["/a.txt"];
        assert_eq!(node.owner, "tester");
        assert_eq!(node.group, DEFAULT_GROUP);
    }

    #[test]
    fn explicit_owner_and_group_win() {
        let xml = r#"<vfs><directory name="d" owner="alice" group="staff"/></vfs>"#;
        let image = parse_image(xml, "tester").unwrap();
        let node = &image.nodes["/d"];
        assert_eq!(node.owner, "alice");
        assert_eq!(node.group, "staff");
    }

    #[test]
    fn base64_body_is_decoded() {
        // "hi there" base64-encoded, padded the way a pretty-printer would
        let xml = "<vfs><file name=\"b.txt\" encoding=\"base64\">\n  aGkgdGhlcmU=\n</file></vfs>";
        let image = parse_image(xml, "tester").unwrap();
        assert_eq!(image.nodes["/b.txt"].content.as_deref(), Some("hi there"));
    }

    #[test]
    fn invalid_base64_is_malformed() {
        let xml = r#"<vfs><file name="b.txt" encoding="base64">!!!not-base64!!!</file></vfs>"#;
        assert!(matches!(
            parse_image(xml, "tester"),
            Err(LoadError::Malformed(_))
        ));
    }

    #[test]
    fn missing_name_is_malformed() {
        let xml = r#"<vfs><file>orphan</file></vfs>"#;
        assert!(matches!(
            parse_image(xml, "tester"),
            Err(LoadError::Malformed(_))
        ));
    }

    #[test]
    fn unknown_element_is_malformed() {
        let xml = r#"<vfs><symlink name="s"/></vfs>"#;
        assert!(matches!(
            parse_image(xml, "tester"),
            Err(LoadError::Malformed(_))
        ));
    }

    #[test]
    fn broken_xml_is_malformed() {
        assert!(matches!(
            parse_image("<vfs><file name=", "tester"),
            Err(LoadError::Malformed(_))
        ));
    }

    #[test]
    fn empty_file_body_is_empty_content() {
        let xml = r#"<vfs><file name="e.txt"/></vfs>"#;
        let image = parse_image(xml, "tester").unwrap();
        assert_eq!(image.nodes["/e.txt"].content.as_deref(), Some(""));
    }
}
