use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use folder_tree::{build_tree, Description, Tree, TreeView, ViewState};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::StatefulWidget;

const EXAMPLE: &str = r#"{
    "root": {
        "type": "FOLDER",
        "name": "root",
        "childs": [
            {
                "type": "FOLDER",
                "name": "first",
                "childs": [
                    { "type": "FOLDER", "name": "labs", "childs": [{ "type": "FILE", "name": "enother-lab.c" }] },
                    {
                        "type": "FOLDER",
                        "name": "fk",
                        "childs": [
                            { "type": "FILE", "name": "fk.svg" },
                            { "type": "FILE", "name": "Дневник самоконтроля.docx" }
                        ]
                    }
                ]
            },
            { "type": "FILE", "name": "some-sort.c" },
            {
                "type": "FOLDER",
                "name": "wallpapers",
                "childs": [
                    { "type": "FILE", "name": "wallpapers.png" },
                    { "type": "FILE", "name": "phone-wallpapers.png" }
                ]
            }
        ]
    }
}"#;

/// `width` folders on every level, each containing `width` files.
fn wide_description(name: &str, depth: usize, width: usize) -> Description {
    let mut children = (0..width)
        .map(|index| Description::file(format!("file-{index}.txt")))
        .collect::<Vec<_>>();
    if depth > 0 {
        children.extend(
            (0..width).map(|index| wide_description(&format!("dir-{index}"), depth - 1, width)),
        );
    }
    Description::folder(name, children)
}

fn wide_tree() -> Tree {
    build_tree(&wide_description("root", 4, 6)).unwrap()
}

fn open_everything(tree: &mut Tree, path: &str) {
    tree.open_folder(path).unwrap();
    let folders = tree
        .resolve(path)
        .unwrap()
        .children()
        .iter()
        .filter(|child| child.as_folder().is_some())
        .map(|child| child.path().to_owned())
        .collect::<Vec<_>>();
    for folder in folders {
        open_everything(tree, &folder);
    }
}

fn init(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("init");
    group.throughput(Throughput::Elements(1));

    group.bench_function("example-json", |bencher| {
        bencher.iter(|| {
            black_box(Tree::from_json(black_box(EXAMPLE)).unwrap());
        });
    });

    let description = wide_description("root", 4, 6);
    group.bench_function("wide", |bencher| {
        bencher.iter(|| {
            black_box(build_tree(black_box(&description)).unwrap());
        });
    });

    group.finish();
}

fn operations(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("operations");
    group.throughput(Throughput::Elements(1));

    let tree = wide_tree();
    group.bench_function("resolve-deep", |bencher| {
        bencher.iter(|| {
            black_box(
                tree.resolve(black_box("root/dir-5/dir-5/dir-5/dir-5/file-5.txt"))
                    .unwrap(),
            );
        });
    });

    group.bench_function("close-recursive", |bencher| {
        bencher.iter_batched(
            || {
                let mut tree = wide_tree();
                open_everything(&mut tree, "root");
                tree
            },
            |mut tree| {
                tree.close_folder_recursive(black_box("root")).unwrap();
                tree
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn renders(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("render");
    group.throughput(Throughput::Elements(1)); // Frames per second

    let buffer_size = Rect::new(0, 0, 100, 100);

    let mut tree = Tree::from_json(EXAMPLE).unwrap();
    open_everything(&mut tree, "root");
    group.bench_function("example", |bencher| {
        bencher.iter_batched(
            ViewState::default,
            |mut state| {
                let mut buffer = Buffer::empty(buffer_size);
                TreeView::new(black_box(&tree)).render(
                    buffer_size,
                    black_box(&mut buffer),
                    &mut state,
                );
            },
            BatchSize::SmallInput,
        );
    });

    let mut tree = wide_tree();
    open_everything(&mut tree, "root");
    group.bench_function("wide-open", |bencher| {
        bencher.iter_batched(
            || {
                let mut state = ViewState::default();
                state.select_last(&tree);
                state
            },
            |mut state| {
                let mut buffer = Buffer::empty(buffer_size);
                TreeView::new(black_box(&tree)).render(
                    buffer_size,
                    black_box(&mut buffer),
                    &mut state,
                );
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

/// Create flamegraphs with `cargo bench --bench bench -- --profile-time=5`
#[cfg(unix)]
fn profiled() -> Criterion {
    use pprof::criterion::{Output, PProfProfiler};
    Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}
#[cfg(not(unix))]
fn profiled() -> Criterion {
    Criterion::default()
}

criterion_group! {
    name = benches;
    config = profiled();
    targets = init, operations, renders
}
criterion_main!(benches);
