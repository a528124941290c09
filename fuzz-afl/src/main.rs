use nbt_inplace::NbtDocument;

#[macro_use]
extern crate afl;
extern crate nbt_inplace;

fn main() {
    fuzz!(|data: &[u8]| {
        if let Ok(mut doc) = NbtDocument::decode(data.to_vec()) {
            let len = doc.buffer().len();
            let _ = doc.set_value(&["Data", "GameType"], 1u8);
            assert_eq!(doc.buffer().len(), len);
            let _ = NbtDocument::decode(doc.into_buffer());
        }
    });
}
