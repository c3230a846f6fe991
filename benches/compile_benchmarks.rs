use criterion::{Criterion, black_box, criterion_group, criterion_main};

use firethorn::{
    BufferInfo, BufferUsage, Format, ImageHandle, ImageInfo, ImageUsage, RenderGraphSystem,
};

fn color_image(name: String, width: u32) -> ImageInfo {
    ImageInfo::new_2d(name, width, 720, Format::Rgba8Unorm, ImageUsage::COLOR_ATTACHMENT)
}

/// Chain of `n` passes where pass i reads pass i-1's image.
///
/// Every pass creates exactly one image, so pass i's image has handle i.
fn chain_system(n: u32) -> RenderGraphSystem {
    let mut system = RenderGraphSystem::new();
    for i in 0..n {
        system.add_setup_pass(move |ctx| {
            if i > 0 {
                ctx.read_image(ImageHandle::from_raw(i - 1), ImageUsage::SAMPLED);
            }
            let img = ctx.create_image(color_image(format!("pass_{i}"), 1280));
            ctx.write_image(img, ImageUsage::COLOR_ATTACHMENT);
            if i == n - 1 {
                ctx.declare_image_output(img);
            }
        });
    }
    system
}

fn bench_compile_chain_small(c: &mut Criterion) {
    let mut system = chain_system(4);
    c.bench_function("render_graph_compile_4_pass_chain", |b| {
        b.iter(|| {
            system.compile().unwrap();
            black_box(system.schedule());
        });
    });
}

fn bench_compile_chain_large(c: &mut Criterion) {
    let mut system = chain_system(64);
    c.bench_function("render_graph_compile_64_pass_chain", |b| {
        b.iter(|| {
            system.compile().unwrap();
            black_box(system.schedule());
        });
    });
}

fn bench_compile_wide_fan_in(c: &mut Criterion) {
    // 16 independent producers feeding one consumer, plus a storage buffer
    // exercising the UAV path.
    let mut system = RenderGraphSystem::new();
    const PRODUCERS: u32 = 16;

    system.add_setup_pass(|ctx| {
        let stats = ctx.create_buffer(BufferInfo::new("stats", 4096, BufferUsage::STORAGE_BUFFER));
        ctx.write_buffer(stats, BufferUsage::STORAGE_BUFFER);
    });
    for i in 0..PRODUCERS {
        system.add_setup_pass(move |ctx| {
            let img = ctx.create_image(color_image(format!("layer_{i}"), 512));
            ctx.write_image(img, ImageUsage::COLOR_ATTACHMENT);
        });
    }
    system.add_setup_pass(move |ctx| {
        ctx.read_buffer(firethorn::BufferHandle::from_raw(0), BufferUsage::STORAGE_BUFFER);
        for i in 0..PRODUCERS {
            ctx.read_image(ImageHandle::from_raw(i), ImageUsage::SAMPLED);
        }
        let composite = ctx.create_image(color_image("composite".into(), 1280));
        ctx.write_image(composite, ImageUsage::COLOR_ATTACHMENT);
        ctx.declare_image_output(composite);
    });

    c.bench_function("render_graph_compile_wide_fan_in", |b| {
        b.iter(|| {
            system.compile().unwrap();
            black_box(system.barrier_plan().op_count());
        });
    });
}

criterion_group!(
    benches,
    bench_compile_chain_small,
    bench_compile_chain_large,
    bench_compile_wide_fan_in
);
criterion_main!(benches);
