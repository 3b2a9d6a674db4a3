//! Builds synthetic version-7 trace files for tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};
use std::rc::Rc;
use tempfile::NamedTempFile;

/// In-memory trace bytes that stay writable after a reader takes a handle
#[derive(Clone)]
pub struct SharedBuffer(Rc<RefCell<Cursor<Vec<u8>>>>);

impl SharedBuffer {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Rc::new(RefCell::new(Cursor::new(bytes))))
    }

    /// Replace bytes in place, leaving the cursor position alone
    pub fn overwrite(&self, offset: usize, replacement: &[u8]) {
        let mut cursor = self.0.borrow_mut();
        cursor.get_mut()[offset..offset + replacement.len()].copy_from_slice(replacement);
    }
}

impl Read for SharedBuffer {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().read(buf)
    }
}

impl Seek for SharedBuffer {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.0.borrow_mut().seek(pos)
    }
}

/// Header block offset stored in a built trace's prologue
pub fn header_offset(bytes: &[u8]) -> usize {
    u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize
}

#[derive(Debug, Clone, Copy)]
pub struct TestEdge {
    pub function_nr: u32,
    pub line: u32,
    pub call_count: u32,
    pub cost: u32,
}

pub fn edge(function_nr: u32, line: u32, call_count: u32, cost: u32) -> TestEdge {
    TestEdge {
        function_nr,
        line,
        call_count,
        cost,
    }
}

#[derive(Debug, Clone)]
pub struct TestFunction {
    pub line: u32,
    pub self_cost: u32,
    pub inclusive_cost: u32,
    pub invocations: u32,
    pub called_from: Vec<TestEdge>,
    pub sub_calls: Vec<TestEdge>,
    pub file: String,
    pub name: String,
}

impl TestFunction {
    pub fn new(name: &str, line: u32, self_cost: u32, inclusive_cost: u32, invocations: u32) -> Self {
        Self {
            line,
            self_cost,
            inclusive_cost,
            invocations,
            called_from: Vec::new(),
            sub_calls: Vec::new(),
            file: "/srv/app/index.php".to_string(),
            name: name.to_string(),
        }
    }

    pub fn file(mut self, file: &str) -> Self {
        self.file = file.to_string();
        self
    }

    pub fn called_from(mut self, edge: TestEdge) -> Self {
        self.called_from.push(edge);
        self
    }

    pub fn sub_call(mut self, edge: TestEdge) -> Self {
        self.sub_calls.push(edge);
        self
    }
}

pub struct TraceFileBuilder {
    version: u32,
    functions: Vec<TestFunction>,
    header_lines: Vec<String>,
}

impl TraceFileBuilder {
    pub fn new() -> Self {
        Self {
            version: 7,
            functions: Vec::new(),
            header_lines: Vec::new(),
        }
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn function(mut self, function: TestFunction) -> Self {
        self.functions.push(function);
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.header_lines.push(format!("{}: {}", key, value));
        self
    }

    pub fn raw_header_line(mut self, line: &str) -> Self {
        self.header_lines.push(line.to_string());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut records = Vec::new();
        let mut offsets = Vec::with_capacity(self.functions.len());
        let records_start = 4 * (3 + self.functions.len());

        for function in &self.functions {
            offsets.push((records_start + records.len()) as u32);
            push_ints(
                &mut records,
                &[
                    function.line,
                    function.self_cost,
                    function.inclusive_cost,
                    function.invocations,
                    function.called_from.len() as u32,
                    function.sub_calls.len() as u32,
                ],
            );
            for e in function.called_from.iter().chain(&function.sub_calls) {
                push_ints(&mut records, &[e.function_nr, e.line, e.call_count, e.cost]);
            }
            records.extend_from_slice(format!("{}\n{}\n", function.file, function.name).as_bytes());
        }

        let header_offset = (records_start + records.len()) as u32;

        let mut bytes = Vec::new();
        push_ints(
            &mut bytes,
            &[self.version, header_offset, self.functions.len() as u32],
        );
        push_ints(&mut bytes, &offsets);
        bytes.extend(records);
        for line in &self.header_lines {
            bytes.extend_from_slice(line.as_bytes());
            bytes.push(b'\n');
        }
        bytes
    }

    pub fn write_temp(&self) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&self.build()).unwrap();
        file.flush().unwrap();
        file
    }
}

fn push_ints(out: &mut Vec<u8>, values: &[u32]) {
    for value in values {
        out.extend_from_slice(&value.to_le_bytes());
    }
}

/// Two functions: `{main}` calls `helper` once
pub fn two_function_trace() -> TraceFileBuilder {
    TraceFileBuilder::new()
        .function(TestFunction::new("{main}", 10, 500, 1500, 3).sub_call(edge(1, 12, 1, 1000)))
        .function(
            TestFunction::new("helper", 40, 1000, 1000, 1)
                .file("/srv/app/lib.php")
                .called_from(edge(0, 12, 1, 1000)),
        )
        .header("version", "1")
        .header("cmd", "/srv/app/index.php")
        .header("summary", "1500")
}
