use std::io;

use serde_json::{json, Value};

use crate::model::FileNode;

/// Render a scanned tree as the nested JSON shape consumed by renderers.
///
/// `extension` appears only on files that have one, `children` only on
/// directories, so the file/directory distinction survives serialization.
pub fn to_json(node: &FileNode) -> Value {
    let mut value = json!({
        "name": node.name(),
        "path": node.path().to_string_lossy(),
        "size": node.size(),
        "isDirectory": node.is_dir(),
    });
    if let Some(ext) = node.extension() {
        value["extension"] = json!(ext);
    }
    if let Some(children) = node.children() {
        value["children"] = Value::Array(children.iter().map(to_json).collect());
    }
    value
}

/// Write a flat CSV listing of every node in the tree, depth-first.
pub fn to_csv(node: &FileNode, w: impl io::Write) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(w);
    writer.write_record(["path", "name", "kind", "size", "extension"])?;
    write_node(&mut writer, node)?;
    writer.flush()?;
    Ok(())
}

fn write_node<W: io::Write>(writer: &mut csv::Writer<W>, node: &FileNode) -> csv::Result<()> {
    let path = node.path().to_string_lossy();
    let name = node.name();
    let size = node.size().to_string();
    writer.write_record([
        path.as_ref(),
        name.as_ref(),
        if node.is_dir() { "dir" } else { "file" },
        size.as_str(),
        node.extension().unwrap_or_default(),
    ])?;
    for child in node.children().unwrap_or_default() {
        write_node(writer, child)?;
    }
    Ok(())
}
