// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the export path after the snapshot: fitting a
// 2x card capture onto A4 and composing the single-page PDF.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{Rgba, RgbaImage};

use marksheet_core::PaperSize;
use marksheet_document::raster::Rasterizer;
use marksheet_document::{
    CanvasRasterizer, FitTransform, Layer, PageLayout, PdfWriter, RasterImage, Rect,
    TemplateHandle,
};

fn bench_fit(c: &mut Criterion) {
    let page = PageLayout::from_paper(PaperSize::A4, 20.0);
    c.bench_function("fit 1600x1200 onto A4", |b| {
        b.iter(|| FitTransform::compute(black_box(1600), black_box(1200), &page));
    });
}

fn bench_compose(c: &mut Criterion) {
    let page = PageLayout::from_paper(PaperSize::A4, 20.0);
    let raster = RasterImage::new(RgbaImage::from_pixel(1600, 1200, Rgba([240, 240, 240, 255])));
    let fit = match FitTransform::compute(1600, 1200, &page) {
        Ok(fit) => fit,
        Err(err) => panic!("fit failed: {err}"),
    };
    let writer = PdfWriter::titled("Result Card");

    c.bench_function("compose single page (1600x1200)", |b| {
        b.iter(|| black_box(writer.compose_single_page(&raster, &page, &fit).ok()));
    });
}

fn bench_capture(c: &mut Criterion) {
    let mut template = TemplateHandle::new(800, 600);
    template
        .push(Layer::Frame {
            rect: Rect::new(0, 0, 800, 600),
            stroke: 2,
            color: Rgba([0, 0, 0, 255]),
        })
        .push(Layer::Rule {
            x: 40,
            y: 520,
            length: 160,
            color: Rgba([0, 0, 0, 255]),
        });
    let rasterizer = CanvasRasterizer::new();

    c.bench_function("canvas capture 800x600 at 2x", |b| {
        b.iter(|| black_box(rasterizer.capture(&template, 2.0).ok()));
    });
}

criterion_group!(benches, bench_fit, bench_compose, bench_capture);
criterion_main!(benches);
