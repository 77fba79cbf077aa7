#![no_main]

use libfuzzer_sys::fuzz_target;
use st_syntax::ast::{AstNode, Declaration};

const MAX_SOURCE_BYTES: usize = 8192;

fuzz_target!(|data: &[u8]| {
    let capped = &data[..data.len().min(MAX_SOURCE_BYTES)];
    let source = String::from_utf8_lossy(capped);

    let parse = st_syntax::parse(&source);
    let root = parse.syntax();
    assert_eq!(root.text().to_string(), source, "tree must be lossless");

    for error in parse.errors() {
        assert!(usize::from(error.range.end()) <= source.len());
    }

    let file = parse.source_file();
    for declaration in file.declarations() {
        let _ = declaration.name();
        if let Declaration::ProgramDeclaration(program) = &declaration {
            for section in program.var_sections() {
                let _ = section.kind();
                for decl in section.declarations() {
                    let _ = decl.comments();
                }
            }
        }
    }
    if let Some(block) = file.block() {
        for statement in block.statements() {
            let _ = statement.syntax().text_range();
        }
    }
    let _ = parse.to_sexp();
});
