//! Tests for rsim-output.

#[cfg(test)]
mod csv_tests {
    use rsim_core::GeoPoint;
    use rsim_engine::PublishedFix;
    use tempfile::TempDir;

    use crate::csv::{CsvFixWriter, FIXES_FILE};
    use crate::row::FixRow;
    use crate::writer::FixWriter;
    use crate::OutputError;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn row(seq: u64, active: bool) -> FixRow {
        let fix = PublishedFix {
            position:    GeoPoint::new(37.4219983, -122.084),
            altitude_m:  12.0,
            speed_mps:   11.11,
            bearing_deg: 90.0,
            active,
        };
        FixRow::from_fix(seq, &fix)
    }

    #[test]
    fn csv_file_created() {
        let dir = tmp();
        let w = CsvFixWriter::new(dir.path()).unwrap();
        assert!(dir.path().join(FIXES_FILE).exists());
        assert_eq!(w.path(), dir.path().join(FIXES_FILE));
    }

    #[test]
    fn csv_creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("a").join("b");
        let _w = CsvFixWriter::new(&nested).unwrap();
        assert!(nested.join(FIXES_FILE).exists());
    }

    #[test]
    fn csv_header_correct() {
        let dir = tmp();
        let mut w = CsvFixWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(FIXES_FILE)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, FixRow::HEADER);
    }

    #[test]
    fn csv_rows_written() {
        let dir = tmp();
        let mut w = CsvFixWriter::new(dir.path()).unwrap();
        w.write_fix(&row(0, true)).unwrap();
        w.write_fix(&row(1, false)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(FIXES_FILE)).unwrap();
        let records: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][0], "0");
        assert_eq!(&records[0][1], "37.4219983");
        assert_eq!(&records[0][2], "-122.0840000");
        assert_eq!(&records[0][4], "11.11");
        assert_eq!(&records[0][6], "1");
        assert_eq!(&records[1][6], "0");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvFixWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn write_after_finish_fails() {
        let dir = tmp();
        let mut w = CsvFixWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(matches!(w.write_fix(&row(0, true)), Err(OutputError::Finished)));
    }
}

#[cfg(test)]
mod publisher_tests {
    use rsim_core::GeoPoint;
    use rsim_engine::{PublishError, PublishedFix, StatePublisher};

    use crate::{FixRow, FixWriter, OutputError, OutputResult, TracePublisher};

    /// In-memory backend that fails every write after `limit` rows.
    #[derive(Default)]
    struct VecWriter {
        rows:  Vec<FixRow>,
        limit: Option<usize>,
    }

    impl FixWriter for VecWriter {
        fn write_fix(&mut self, row: &FixRow) -> OutputResult<()> {
            if self.limit.is_some_and(|l| self.rows.len() >= l) {
                return Err(OutputError::Io(std::io::Error::other("disk full")));
            }
            self.rows.push(*row);
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    fn fix(lon: f64) -> PublishedFix {
        PublishedFix {
            position:    GeoPoint::new(0.0, lon),
            altitude_m:  0.0,
            speed_mps:   5.0,
            bearing_deg: 90.0,
            active:      true,
        }
    }

    #[test]
    fn numbers_rows_in_order() {
        let trace = TracePublisher::new(VecWriter::default());
        for i in 0..3 {
            trace.publish(&fix(i as f64)).unwrap();
        }
        assert_eq!(trace.rows_written(), 3);
        let rows = trace.into_writer().rows;
        assert_eq!(rows.iter().map(|r| r.seq).collect::<Vec<_>>(), [0, 1, 2]);
        assert_eq!(rows[2].lon, 2.0);
    }

    #[test]
    fn keeps_first_error() {
        let trace = TracePublisher::new(VecWriter { rows: Vec::new(), limit: Some(1) });
        assert!(trace.publish(&fix(0.0)).is_ok());
        assert!(matches!(trace.publish(&fix(1.0)), Err(PublishError::Io(_))));
        assert!(trace.publish(&fix(2.0)).is_err());
        assert_eq!(trace.rows_written(), 1);
        assert!(matches!(trace.take_error(), Some(OutputError::Io(_))));
        assert!(trace.take_error().is_none());
    }

    #[test]
    fn finished_trace_rejects_fixes() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let trace = TracePublisher::csv(dir.path()).unwrap();
        trace.finish().unwrap();
        assert!(matches!(trace.publish(&fix(0.0)), Err(PublishError::Rejected(_))));
        assert!(matches!(trace.take_error(), Some(OutputError::Finished)));
    }
}

#[cfg(test)]
mod integration {
    use std::sync::Arc;

    use rsim_core::{EngineConfig, GeoPoint};
    use rsim_engine::SimulationEngine;
    use rsim_route::Route;

    use crate::csv::FIXES_FILE;
    use crate::TracePublisher;

    #[tokio::test(start_paused = true)]
    async fn engine_run_to_csv() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let trace = Arc::new(TracePublisher::csv(dir.path()).unwrap());

        let config = EngineConfig { seed: Some(1), ..EngineConfig::default() };
        let mut engine = SimulationEngine::new(Arc::clone(&trace), config).unwrap();

        let a = GeoPoint::new(0.0, 0.0);
        let b = a.offset_m(0.0, 300.0);
        let c = b.offset_m(200.0, 0.0);
        engine.start(Route::new(vec![a, b, c])).await.unwrap();
        let outcome = engine.wait().await.unwrap().unwrap();
        trace.finish().unwrap();
        assert!(trace.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join(FIXES_FILE)).unwrap();
        let records: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len() as u64, outcome.ticks + 2);
        assert_eq!(records.len() as u64, trace.rows_written());

        let active: Vec<_> = records.iter().map(|r| r[6].to_owned()).collect();
        assert!(active[..active.len() - 1].iter().all(|a| a == "1"));
        assert_eq!(active[active.len() - 1], "0");
    }
}
