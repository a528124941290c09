use nbt_inplace::{DecodeConfig, NbtDocument, Value};

/// Collects the name path of every writable tag reachable through compounds.
fn writable_paths(value: &Value, prefix: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
    let Some(compound) = value.as_compound() else {
        return;
    };
    for (name, tag) in compound.iter() {
        prefix.push(name.to_owned());
        if tag.id().is_writable() {
            out.push(prefix.clone());
        }
        writable_paths(tag.value(), prefix, out);
        prefix.pop();
    }
}

pub fn test(data: &[u8]) {
    let config = DecodeConfig::default();
    let Ok(mut doc) = NbtDocument::decode_with(data.to_vec(), &config) else {
        return;
    };

    let mut paths = Vec::new();
    writable_paths(doc.root().value(), &mut Vec::new(), &mut paths);

    for path in paths {
        let path: Vec<&str> = path.iter().map(String::as_str).collect();
        let before = doc.buffer().to_vec();
        let Some(tag) = doc.get(&path) else {
            continue;
        };
        let (offset, width) = (tag.raw_offset(), tag.id().fixed_width().unwrap_or(0));

        if doc.set_value(&path, 0u8).is_ok() {
            let after = doc.buffer();
            assert_eq!(before.len(), after.len());
            assert_eq!(before[..offset], after[..offset]);
            assert_eq!(before[offset + width..], after[offset + width..]);
        } else {
            assert_eq!(&before[..], doc.buffer());
        }
    }

    let reread = NbtDocument::decode_with(doc.buffer().to_vec(), &config)
        .expect("patched buffer must still decode");
    assert_eq!(reread.buffer(), doc.buffer());
}
