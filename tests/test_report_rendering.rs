//! Integration tests for PDF and text rendering.

use chrono::NaiveDate;
use report_oxide::config::{Preset, ReportConfig};
use report_oxide::delivery::{Download, OutputFormat};
use report_oxide::render::{generate, PdfCanvas, Renderer, TextCanvas};
use report_oxide::report::{assemble, ReportRequest};
use std::fs;
use tempfile::tempdir;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

fn quantum() -> ReportRequest {
    ReportRequest::new("Quantum Computing", "Quantum computing uses qubits.")
        .generated_on(date())
        .with_section("History", "Proposed in the early 1980s.")
        .with_section("Applications", "Cryptography and simulation.")
}

fn long_request() -> ReportRequest {
    let filler = "Superposition lets a register hold many states at once. ".repeat(60);
    let mut request = ReportRequest::new("Quantum Computing", filler.as_str()).generated_on(date());
    for i in 0..5 {
        request = request.with_section(format!("Topic {}", i), filler.as_str());
    }
    request
}

fn pdf_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

mod pdf_tests {
    use super::*;

    #[test]
    fn test_pdf_envelope() {
        let output = generate(&quantum(), &ReportConfig::default(), OutputFormat::Pdf).unwrap();
        let text = pdf_text(&output.bytes);
        assert!(text.starts_with("%PDF-1.7"));
        assert!(text.trim_end().ends_with("%%EOF"));
        assert!(text.contains("/WinAnsiEncoding"));
        assert!(text.contains("(Quantum Computing)"));
        assert!(text.contains("(D:20240305000000)"));
    }

    #[test]
    fn test_page_count_matches_catalog() {
        let config = ReportConfig::default();
        let output = generate(&long_request(), &config, OutputFormat::Pdf).unwrap();
        assert!(output.page_count > 2);
        let text = pdf_text(&output.bytes);
        assert!(text.contains(&format!("/Count {}", output.page_count)));
        assert_eq!(text.matches("/Type /Page>>").count(), output.page_count);
    }

    #[test]
    fn test_every_page_has_footer() {
        let config = ReportConfig::default();
        let output = generate(&long_request(), &config, OutputFormat::Pdf).unwrap();
        let text = pdf_text(&output.bytes);
        for page in 1..=output.page_count {
            let footer = format!("(Page {} | AI Academic Engine) Tj", page);
            assert!(text.contains(&footer), "missing footer on page {}", page);
        }
        assert!(text.contains("(OFFICIAL ACADEMIC REPORT) Tj"));
    }

    #[test]
    fn test_comprehensive_footer_has_total() {
        let config = ReportConfig::preset(Preset::Comprehensive);
        let output = generate(&quantum(), &config, OutputFormat::Pdf).unwrap();
        assert_eq!(output.page_count, 3);
        let text = pdf_text(&output.bytes);
        assert!(text.contains("(Page 1 of 3) Tj"));
        assert!(text.contains("(Page 3 of 3) Tj"));
        assert!(text.contains("(COMPREHENSIVE RESEARCH ASSIGNMENT) Tj"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let config = ReportConfig::default();
        let first = generate(&long_request(), &config, OutputFormat::Pdf).unwrap();
        let second = generate(&long_request(), &config, OutputFormat::Pdf).unwrap();
        assert_eq!(first.bytes, second.bytes);
    }

    #[test]
    fn test_compressed_streams() {
        let config = ReportConfig::default().with_compress(true);
        let output = generate(&quantum(), &config, OutputFormat::Pdf).unwrap();
        let text = pdf_text(&output.bytes);
        assert!(text.contains("/FlateDecode"));
        assert!(!text.contains("(1. EXECUTIVE SUMMARY) Tj"));
    }

    #[test]
    fn test_latin1_text_is_escaped() {
        let request = ReportRequest::new("Café 🚀", "Résumé").generated_on(date());
        let output = generate(&request, &ReportConfig::default(), OutputFormat::Pdf).unwrap();
        let text = pdf_text(&output.bytes);
        assert!(text.contains("(CAF\\311) Tj"));
        assert!(text.contains("(R\\351sum\\351) Tj"));
    }

    #[test]
    fn test_renderer_with_explicit_canvas() {
        let config = ReportConfig::preset(Preset::Minimal);
        let request = quantum();
        let blocks = assemble(&request, &config);
        let canvas = PdfCanvas::new(&config, &request.title, request.generated_at());
        let output = Renderer::new(canvas, &config)
            .render(&blocks, &request.title, request.generated_at())
            .unwrap();
        let text = pdf_text(&output.bytes);
        assert!(text.contains("(Page 2) Tj"));
        assert!(!text.contains("OFFICIAL ACADEMIC REPORT"));
    }
}

mod text_tests {
    use super::*;

    #[test]
    fn test_text_output_pages() {
        let output = generate(&quantum(), &ReportConfig::default(), OutputFormat::Text).unwrap();
        let text = String::from_utf8(output.bytes).unwrap();
        let pages: Vec<&str> = text.split('\u{000C}').collect();
        assert_eq!(pages.len(), output.page_count);
        assert_eq!(output.page_count, 2);

        assert!(pages[0].contains("QUANTUM COMPUTING"));
        assert!(pages[0].contains("Generated on: March 05, 2024"));
        assert!(pages[0].contains("Page 1 | AI Academic Engine"));
        assert!(pages[1].contains("1. EXECUTIVE SUMMARY"));
        assert!(pages[1].contains("3. Applications"));
        assert!(pages[1].contains("-----"));
    }

    #[test]
    fn test_text_and_pdf_paginate_alike() {
        let config = ReportConfig::default();
        let pdf = generate(&long_request(), &config, OutputFormat::Pdf).unwrap();
        let txt = generate(&long_request(), &config, OutputFormat::Text).unwrap();
        assert_eq!(pdf.page_count, txt.page_count);
    }

    #[test]
    fn test_text_canvas_renderer() {
        let config = ReportConfig::default();
        let request = quantum();
        let blocks = assemble(&request, &config);
        let output = Renderer::new(TextCanvas::new(config.geometry), &config)
            .render(&blocks, &request.title, date())
            .unwrap();
        assert_eq!(output.page_count, 2);
    }
}

mod delivery_tests {
    use super::*;

    #[test]
    fn test_download_saved_to_disk() {
        let dir = tempdir().unwrap();
        let output = generate(&quantum(), &ReportConfig::default(), OutputFormat::Pdf).unwrap();
        let download = Download::new("Quantum Computing", OutputFormat::Pdf, output);
        assert_eq!(download.file_name, "Assignment_Quantum_Computing.pdf");
        assert_eq!(download.mime, "application/pdf");

        let path = download.save_in(dir.path()).unwrap();
        let saved = fs::read(&path).unwrap();
        assert!(saved.starts_with(b"%PDF-1.7"));
        assert_eq!(saved.len(), download.bytes.len());
    }

    #[test]
    fn test_text_download_name() {
        let output = generate(&quantum(), &ReportConfig::default(), OutputFormat::Text).unwrap();
        let download = Download::new("Kyoto 京都", OutputFormat::Text, output);
        assert_eq!(download.file_name, "Assignment_Kyoto.txt");
        assert_eq!(download.mime, "text/plain");
    }
}
