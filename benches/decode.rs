//! Decode-pipeline benchmarks.
//!
//! Measures the per-invocation cost of the precompiled converters on the
//! payload shapes native events actually produce: flat primitive argument
//! lists, typed arrays, and string-keyed dicts.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use hostbridge::{
    Callback, Context, EntityHandle, EntityId, EntityPool, HostValue, ParamType, ReturnKind, Value,
};

struct EmptyPool;

impl EntityPool for EmptyPool {
    fn get_or_create(&self, _id: EntityId) -> Option<Arc<dyn EntityHandle>> {
        None
    }
}

fn flat_primitives(c: &mut Criterion) {
    let ctx = Context::new(Arc::new(EmptyPool));
    let cb = Callback::compile(
        &[ParamType::I64, ParamType::F64, ParamType::Str, ParamType::Bool],
        ReturnKind::Void,
        |_: &[HostValue]| None,
    )
    .unwrap();
    let args = [
        Value::Int(42),
        Value::Double(0.5),
        Value::String("weapon_pistol".into()),
        Value::Bool(true),
    ];

    c.bench_function("invoke_flat_primitives", |b| {
        b.iter(|| black_box(cb.invoke(&ctx, black_box(&args))))
    });
}

fn typed_array(c: &mut Criterion) {
    let ctx = Context::new(Arc::new(EmptyPool));
    let cb = Callback::compile(
        &[ParamType::Array(Box::new(ParamType::I32))],
        ReturnKind::Void,
        |_: &[HostValue]| None,
    )
    .unwrap();

    let mut group = c.benchmark_group("decode_i32_array");
    for size in [16usize, 256, 4096] {
        let args = [Value::List((0..size as i64).map(Value::Int).collect())];
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("{size}"), |b| {
            b.iter(|| black_box(cb.invoke(&ctx, black_box(&args))))
        });
    }
    group.finish();
}

fn string_keyed_dict(c: &mut Criterion) {
    let ctx = Context::new(Arc::new(EmptyPool));
    let cb = Callback::compile(
        &[ParamType::Dict {
            key: Box::new(ParamType::Str),
            value: Box::new(ParamType::F64),
        }],
        ReturnKind::Void,
        |_: &[HostValue]| None,
    )
    .unwrap();

    let keys: Vec<String> = (0..64).map(|i| format!("stat_{i}")).collect();
    let values: Vec<Value> = (0..64).map(|i| Value::Double(i as f64)).collect();
    let args = [Value::dict(keys, values)];

    c.bench_function("decode_f64_dict_64", |b| {
        b.iter(|| black_box(cb.invoke(&ctx, black_box(&args))))
    });
}

criterion_group!(benches, flat_primitives, typed_array, string_keyed_dict);
criterion_main!(benches);
