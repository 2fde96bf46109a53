use criterion::{black_box, criterion_group, criterion_main, Criterion};
use egui::{pos2, vec2, Rect};
use egui_spotlight::{ElementId, ElementKind, ProximityScaler, SceneElement, StaticScene};

fn hero(elements: u64) -> StaticScene {
    let mut scene = StaticScene::new().with_hero(
        ElementId(0),
        Rect::from_min_size(pos2(0., 0.), vec2(1600., 900.)),
    );
    for i in 0..elements {
        let (col, row) = ((i % 8) as f32, (i / 8) as f32);
        scene.push_hero_element(SceneElement::new(
            ElementId(i + 1),
            ElementKind::Span,
            Rect::from_min_size(pos2(col * 200., row * 40.), vec2(180., 30.)),
        ));
    }
    scene
}

fn bench_pointer_move(c: &mut Criterion) {
    for count in [16, 256] {
        let scene = hero(count);
        c.bench_function(&format!("pointer_move_{count}_elements"), |b| {
            let mut scaler = ProximityScaler::default();
            let mut x = 0.;
            b.iter(|| {
                x = (x + 7.) % 1600.;
                black_box(scaler.on_pointer_move(pos2(x, 120.), &scene));
            });
        });
    }
}

criterion_group!(benches, bench_pointer_move);
criterion_main!(benches);
