use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

//------------------------------------------

pub struct Report {
    inner: Mutex<Box<dyn ReportInner + Send>>,
}

pub trait ReportInner {
    fn set_title(&mut self, txt: &str);
    fn progress(&mut self, percent: u8);
    fn log(&mut self, txt: &str);
    fn to_stdout(&mut self, txt: &str);
    fn complete(&mut self);
}

impl Report {
    pub fn new(inner: Box<dyn ReportInner + Send>) -> Report {
        Report {
            inner: Mutex::new(inner),
        }
    }

    pub fn set_title(&self, txt: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.set_title(txt)
    }

    pub fn progress(&self, percent: u8) {
        let mut inner = self.inner.lock().unwrap();
        inner.progress(percent)
    }

    pub fn info(&self, txt: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.log(txt)
    }

    pub fn warn(&self, txt: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.log(&format!("warning: {}", txt))
    }

    pub fn fatal(&self, txt: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.log(txt)
    }

    // Force a message to be printed to stdout.  eg, the statistics
    // block.
    pub fn to_stdout(&self, txt: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.to_stdout(txt)
    }

    pub fn complete(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.complete();
    }
}

//------------------------------------------

struct PBInner {
    bar: ProgressBar,
}

impl PBInner {
    fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40}] {eta} remaining")
                .unwrap()
                .progress_chars("=> "),
        );
        Self { bar }
    }
}

impl ReportInner for PBInner {
    fn set_title(&mut self, txt: &str) {
        self.bar.set_message(txt.to_string());
    }

    fn progress(&mut self, percent: u8) {
        self.bar.set_position(percent as u64);
        self.bar.tick();
    }

    fn log(&mut self, txt: &str) {
        self.bar.println(txt);
    }

    fn to_stdout(&mut self, txt: &str) {
        println!("{}", txt);
    }

    fn complete(&mut self) {
        self.bar.finish_and_clear();
    }
}

pub fn mk_progress_bar_report() -> Report {
    Report::new(Box::new(PBInner::new()))
}

//------------------------------------------

struct SimpleInner {
    last_progress: std::time::SystemTime,
}

impl SimpleInner {
    fn new() -> SimpleInner {
        SimpleInner {
            last_progress: std::time::SystemTime::now(),
        }
    }
}

impl ReportInner for SimpleInner {
    fn set_title(&mut self, txt: &str) {
        eprintln!("{}", txt);
    }

    fn progress(&mut self, percent: u8) {
        let elapsed = self.last_progress.elapsed().unwrap_or_default();
        if elapsed > std::time::Duration::from_secs(5) {
            eprintln!("Progress: {}%", percent);
            self.last_progress = std::time::SystemTime::now();
        }
    }

    fn log(&mut self, txt: &str) {
        eprintln!("{}", txt);
    }

    fn to_stdout(&mut self, txt: &str) {
        println!("{}", txt);
    }

    fn complete(&mut self) {}
}

pub fn mk_simple_report() -> Report {
    Report::new(Box::new(SimpleInner::new()))
}

//------------------------------------------

struct QuietInner {}

impl ReportInner for QuietInner {
    fn set_title(&mut self, _txt: &str) {}

    fn progress(&mut self, _percent: u8) {}

    fn log(&mut self, _txt: &str) {}

    fn to_stdout(&mut self, _txt: &str) {}

    fn complete(&mut self) {}
}

pub fn mk_quiet_report() -> Report {
    Report::new(Box::new(QuietInner {}))
}

//------------------------------------------
