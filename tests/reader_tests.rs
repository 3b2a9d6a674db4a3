mod common;

use calltrace_studio::format::{CostUnit, FormattedCost};
use calltrace_studio::reader::{CallEdge, EdgeKind, TraceReader};
use calltrace_studio::utils::TraceError;
use common::{edge, two_function_trace, TestFunction, TraceFileBuilder};
use pretty_assertions::assert_eq;
use std::io::Cursor;

fn open_bytes(bytes: Vec<u8>, unit: CostUnit) -> TraceReader<Cursor<Vec<u8>>> {
    TraceReader::from_reader(Cursor::new(bytes), unit).unwrap()
}

#[test]
fn test_decode_two_function_scenario() {
    let file = two_function_trace().write_temp();
    let mut reader = TraceReader::open(file.path(), CostUnit::Usec).unwrap();

    assert_eq!(reader.version(), 7);
    assert_eq!(reader.function_count(), 2);

    let info = reader.function_info(0).unwrap();
    assert_eq!(info.line, 10);
    assert_eq!(info.summed_self_cost, FormattedCost::Usec(500));
    assert_eq!(info.summed_inclusive_cost, FormattedCost::Usec(1500));
    assert_eq!(info.invocation_count, 3);
    assert_eq!(info.called_from_count, 0);
    assert_eq!(info.sub_call_count, 1);
    assert_eq!(info.file, "/srv/app/index.php");
    assert_eq!(info.function_name, "{main}");
}

#[test]
fn test_sub_call_and_called_from_edges() {
    let mut reader = open_bytes(two_function_trace().build(), CostUnit::Usec);

    assert_eq!(
        reader.sub_call_edge(0, 0).unwrap(),
        CallEdge {
            function_nr: 1,
            line: 12,
            call_count: 1,
            summed_cost: 1000
        }
    );
    assert_eq!(reader.called_from_edge(1, 0).unwrap().function_nr, 0);

    let formatted = reader.sub_call_info(0, 0).unwrap();
    assert_eq!(formatted.summed_cost, FormattedCost::Usec(1000));
}

#[test]
fn test_edge_counts_match_blocks_for_every_function() {
    let builder = TraceFileBuilder::new()
        .function(
            TestFunction::new("a", 1, 10, 60, 1)
                .sub_call(edge(1, 2, 1, 20))
                .sub_call(edge(2, 3, 2, 30)),
        )
        .function(
            TestFunction::new("b", 5, 20, 20, 1)
                .called_from(edge(0, 2, 1, 20))
                .called_from(edge(2, 9, 1, 5)),
        )
        .function(
            TestFunction::new("c", 8, 25, 30, 2)
                .called_from(edge(0, 3, 2, 30))
                .sub_call(edge(1, 9, 1, 5)),
        );
    let mut reader = open_bytes(builder.build(), CostUnit::Usec);

    let expected = [(0, 2), (2, 0), (1, 1)];
    for (nr, (callers, callees)) in expected.into_iter().enumerate() {
        let record = reader.function_record(nr).unwrap();
        assert_eq!(record.called_from_count, callers, "function {}", nr);
        assert_eq!(record.sub_call_count, callees, "function {}", nr);

        for i in 0..callers as usize {
            let e = reader.called_from_edge(nr, i).unwrap();
            assert!((e.function_nr as usize) < reader.function_count());
        }
        for i in 0..callees as usize {
            let e = reader.sub_call_edge(nr, i).unwrap();
            assert!((e.function_nr as usize) < reader.function_count());
        }
    }

    // Sub-call edges start after the called-from block
    let c_callee = reader.sub_call_edge(2, 0).unwrap();
    assert_eq!((c_callee.function_nr, c_callee.line), (1, 9));
    assert_eq!(reader.called_from_edge(1, 1).unwrap().line, 9);
    assert_eq!(reader.function_record(2).unwrap().function_name, "c");
}

#[test]
fn test_unsupported_version() {
    let bytes = two_function_trace().version(6).build();
    let err = TraceReader::from_reader(Cursor::new(bytes), CostUnit::Usec)
        .err()
        .unwrap();

    assert!(matches!(
        err,
        TraceError::UnsupportedVersion {
            found: 6,
            expected: 7
        }
    ));
    let message = err.to_string();
    assert!(message.contains('6') && message.contains('7'), "{}", message);
}

#[test]
fn test_open_missing_file() {
    let err = TraceReader::open("/no/such/trace.file", CostUnit::Usec)
        .err()
        .unwrap();
    assert!(matches!(err, TraceError::FileOpen { .. }));
}

#[test]
fn test_invalid_function_number() {
    let mut reader = open_bytes(two_function_trace().build(), CostUnit::Usec);

    assert!(matches!(
        reader.function_info(2),
        Err(TraceError::InvalidFunctionNumber {
            function_nr: 2,
            function_count: 2
        })
    ));
    assert!(matches!(
        reader.called_from_info(5, 0),
        Err(TraceError::InvalidFunctionNumber { .. })
    ));
}

#[test]
fn test_invalid_edge_index() {
    let mut reader = open_bytes(two_function_trace().build(), CostUnit::Usec);

    assert!(matches!(
        reader.called_from_info(0, 0),
        Err(TraceError::InvalidEdgeIndex {
            kind: EdgeKind::CalledFrom,
            edge_count: 0,
            ..
        })
    ));
    assert!(matches!(
        reader.sub_call_info(0, 1),
        Err(TraceError::InvalidEdgeIndex {
            kind: EdgeKind::SubCall,
            edge_index: 1,
            edge_count: 1,
            ..
        })
    ));
}

#[test]
fn test_truncated_record_is_io_error() {
    let mut bytes = two_function_trace().build();
    // Offset table entry for function 1 pointing past the end
    let past_end = (bytes.len() as u32 + 100).to_le_bytes();
    bytes[16..20].copy_from_slice(&past_end);

    let mut reader = open_bytes(bytes, CostUnit::Usec);
    assert!(matches!(reader.function_info(1), Err(TraceError::Io(_))));
    // Other functions remain readable
    assert_eq!(reader.function_info(0).unwrap().function_name, "{main}");
}

#[test]
fn test_costs_in_configured_unit() {
    let mut reader = open_bytes(two_function_trace().build(), CostUnit::Msec);
    let info = reader.function_info(0).unwrap();
    assert_eq!(info.summed_self_cost, FormattedCost::Msec(1));
    assert_eq!(info.summed_inclusive_cost, FormattedCost::Msec(2));

    let mut reader = open_bytes(two_function_trace().build(), CostUnit::Percent);
    let info = reader.function_info(1).unwrap();
    assert_eq!(
        info.summed_inclusive_cost,
        FormattedCost::Percent("66.67".to_string())
    );
    assert_eq!(
        reader.called_from_info(1, 0).unwrap().summed_cost,
        FormattedCost::Percent("66.67".to_string())
    );
}

#[test]
fn test_format_cost_with_override_unit() {
    let mut reader = open_bytes(two_function_trace().build(), CostUnit::Msec);

    assert_eq!(reader.format_cost(1500, None).unwrap(), FormattedCost::Msec(2));
    assert_eq!(reader.format_cost(1499, None).unwrap(), FormattedCost::Msec(1));
    assert_eq!(
        reader.format_cost(777, Some(CostUnit::Usec)).unwrap(),
        FormattedCost::Usec(777)
    );
    assert_eq!(
        reader.format_cost(750, Some(CostUnit::Percent)).unwrap(),
        FormattedCost::Percent("50.00".to_string())
    );
}

#[test]
fn test_percent_without_summary_is_zero() {
    let bytes = TraceFileBuilder::new()
        .function(TestFunction::new("only", 1, 900, 900, 1))
        .build();
    let mut reader = open_bytes(bytes, CostUnit::Percent);

    let info = reader.function_info(0).unwrap();
    assert_eq!(info.summed_self_cost.to_string(), "0.00%");
    assert_eq!(
        reader.format_cost(123, None).unwrap(),
        FormattedCost::Percent("0.00".to_string())
    );
}
