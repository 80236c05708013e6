//! Benchmark: size, serialize, deserialize and extent (walk without decode) for a record with
//! strings, a string array and a nested bool grid.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use schemabuf::{parse, Record, Struct, Value};

const SCHEMA: &str = r#"
struct Player {
    name: string;
    roles: array<string>;
    health: i8;
    food: i16;
    score: u32;
    speed: f64;
    scene: array<array<bool>>;
}
"#;

fn player() -> Record {
    let scene: Vec<Vec<bool>> = (0..16)
        .map(|row| (0..16).map(|col| (row + col) % 3 == 0).collect())
        .collect();
    let mut r = Record::new();
    r.insert("name".to_string(), Value::from("John Doe"));
    r.insert("roles".to_string(), Value::from(vec!["Admin", "Moderator", "Enjoyer"]));
    r.insert("health".to_string(), Value::I8(69));
    r.insert("food".to_string(), Value::I16(420));
    r.insert("score".to_string(), Value::U32(2_000_000_000));
    r.insert("speed".to_string(), Value::F64(1.25));
    r.insert("scene".to_string(), Value::from(scene));
    r
}

fn bench_struct_codec(c: &mut Criterion) {
    let schema = parse(SCHEMA).expect("parse");
    let s: &Struct = schema.get("Player").expect("Player");
    let record = player();
    let bytes = s.serialize(&record).expect("serialize");
    let mut buf = vec![0u8; bytes.len()];

    c.bench_function("size_player", |b| {
        b.iter(|| s.size(black_box(&record)).expect("size"))
    });

    c.bench_function("serialize_player_alloc", |b| {
        b.iter(|| s.serialize(black_box(&record)).expect("serialize"))
    });

    c.bench_function("serialize_player_in_place", |b| {
        b.iter(|| {
            s.serialize_into(black_box(&mut buf), black_box(&record), 0)
                .expect("serialize_into")
        })
    });

    c.bench_function("deserialize_player", |b| {
        b.iter(|| s.deserialize(black_box(&bytes), 0).expect("deserialize"))
    });

    c.bench_function("extent_player", |b| {
        b.iter(|| s.extent(black_box(&bytes), 0).expect("extent"))
    });

    eprintln!("---");
    eprintln!(
        "player record: {} bytes encoded, {} fields, min size {}",
        bytes.len(),
        s.len(),
        s.min_size()
    );
}

criterion_group!(benches, bench_struct_codec);
criterion_main!(benches);
