use super::*;

use crate::copier::test_utils::MemSink;

//------------------------------------------

#[test]
fn unbounded_writes_pass_through() {
    let mut sink = BoundedSink::new(MemSink::new(), None, 0);

    assert_eq!(sink.write(b"foobar").unwrap(), 6);
    assert_eq!(sink.write(b"foobar").unwrap(), 6);
    assert_eq!(sink.position().unwrap(), 12);
}

#[test]
fn writes_within_the_limit_succeed() {
    let mut sink = BoundedSink::new(MemSink::new(), Some(10), 0);

    assert_eq!(sink.write(b"foob").unwrap(), 4);
    // lands exactly on the limit
    assert_eq!(sink.write(b"arfoob").unwrap(), 6);
}

#[test]
fn writes_past_the_limit_are_rejected_whole() {
    let mut sink = BoundedSink::new(MemSink::new(), Some(10), 0);

    assert_eq!(sink.write(b"foobar").unwrap(), 6);

    let err = sink.write(b"foobar").unwrap_err();
    assert!(matches!(
        err,
        CopyError::LimitExceeded {
            offset: 6,
            requested: 6,
            limit: 10
        }
    ));

    // nothing of the rejected write reached the medium
    let inner = sink.inner;
    assert_eq!(inner.data, b"foobar");
    assert_eq!(inner.nr_writes, 1);
}

#[test]
fn rejected_writes_leave_prior_content_alone() {
    let mut sink = BoundedSink::new(MemSink::with_data(b"abxdrz1234".to_vec()), Some(10), 0);

    sink.seek_to(6).unwrap();
    assert!(sink.write(b"foobar").is_err());
    assert_eq!(sink.inner.data, b"abxdrz1234");
}

//------------------------------------------

#[test]
fn flushes_every_interval() {
    let mut sink = BoundedSink::new(MemSink::new(), None, 10);

    sink.write(&[0u8; 4]).unwrap();
    sink.write(&[0u8; 4]).unwrap();
    assert_eq!(sink.inner.nr_flushes, 0);

    // 12 unflushed bytes trips the interval and resets the counter
    sink.write(&[0u8; 4]).unwrap();
    assert_eq!(sink.inner.nr_flushes, 1);
    assert_eq!(sink.unflushed(), 0);

    sink.write(&[0u8; 8]).unwrap();
    assert_eq!(sink.inner.nr_flushes, 1);
    sink.write(&[0u8; 2]).unwrap();
    assert_eq!(sink.inner.nr_flushes, 2);
}

#[test]
fn zero_interval_never_flushes() {
    let mut sink = BoundedSink::new(MemSink::new(), None, 0);

    sink.write(&vec![0u8; 1 << 20]).unwrap();
    assert_eq!(sink.inner.nr_flushes, 0);
    assert_eq!(sink.unflushed(), 0);
}

#[test]
fn flush_failure_does_not_fail_the_write() {
    let mut inner = MemSink::new();
    inner.fail_flush = true;
    let mut sink = BoundedSink::new(inner, None, 4);

    assert_eq!(sink.write(b"foobar").unwrap(), 6);
    assert_eq!(sink.flush_failures(), 1);
    assert!(matches!(
        sink.last_flush_error(),
        Some(CopyError::Flush(_))
    ));

    // the counter was still reset, so the next short write doesn't
    // immediately retry the flush
    assert_eq!(sink.write(b"ab").unwrap(), 2);
    assert_eq!(sink.flush_failures(), 1);
}

#[test]
fn explicit_flush_propagates_errors() {
    let mut inner = MemSink::new();
    inner.fail_flush = true;
    let mut sink = BoundedSink::new(inner, None, 0);

    sink.write(b"foobar").unwrap();
    assert!(matches!(sink.flush(), Err(CopyError::Flush(_))));
}

//------------------------------------------

mod file_sink {
    use super::*;
    use crate::copier::base::Sink;

    #[test]
    fn read_back_what_was_written() {
        let file = tempfile::tempfile().unwrap();
        let mut sink = FileSink::new(file);

        assert_eq!(sink.write(b"the quick brown fox").unwrap(), 19);
        assert_eq!(sink.position().unwrap(), 19);

        sink.seek_to(4).unwrap();
        let mut buf = [0u8; 5];
        assert_eq!(sink.read(&mut buf).unwrap(), 5);
        assert_eq!(&buf, b"quick");
        assert_eq!(sink.position().unwrap(), 9);
    }

    #[test]
    fn reads_past_the_end_are_short() {
        let file = tempfile::tempfile().unwrap();
        let mut sink = FileSink::new(file);
        sink.write(b"foobar").unwrap();

        sink.seek_to(3).unwrap();
        let mut buf = [0u8; 16];
        assert_eq!(sink.read(&mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], b"bar");
    }
}

//------------------------------------------
