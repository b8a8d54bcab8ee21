use log::info;
use itertools::Itertools;
use num_bigint::BigInt;
use yui::{Ring, RingOps};
use yui_homfly::{virtual_homfly, HomflyConfig, HomflyPoly, SkeinResolver, TraceEntry};
use yui::util::log::indent;

use crate::app::err::{ensure, err, AppResult};
use crate::app::utils::{load_braid, Format};

pub fn dispatch(args: &Args) -> AppResult<String> {
    if args.bigint {
        App::new(args.clone()).run::<BigInt>()
    } else {
        App::new(args.clone()).run::<i64>()
    }
}

#[derive(Clone, Default, Debug, clap::Args)]
pub struct Args {
    pub braid: String,

    #[arg(short, long)]
    pub strands: Option<usize>,

    #[arg(short, long)]
    pub mirror: bool,

    #[arg(long = "virtual")]
    pub virt: bool,

    #[arg(short, long)]
    pub cache: bool,

    #[arg(long)]
    pub max_depth: Option<usize>,

    #[arg(long)]
    pub max_nodes: Option<usize>,

    #[arg(long)]
    pub bigint: bool,

    #[arg(short = 'd', long)]
    pub show_diagram: bool,

    #[arg(short = 't', long)]
    pub show_trace: bool,

    #[arg(short, long, default_value = "unicode")]
    pub format: Format,

    #[arg(long, default_value = "0")]
    pub log: u8,
}

pub struct App {
    args: Args,
    buff: String
}

impl App {
    pub fn new(args: Args) -> Self {
        let buff = String::with_capacity(1024);
        App { args, buff }
    }

    pub fn run<R>(&mut self) -> AppResult<String>
    where R: Ring, for<'x> &'x R: RingOps<R> {
        ensure!(!(self.args.virt && self.args.show_trace), "--show-trace is not available with --virtual.");

        let b = load_braid(&self.args.braid, self.args.strands, self.args.mirror)?;
        let config = self.config();

        info!("braid: {b} ({} strands), coeffs: {}", b.strands(), R::math_symbol());

        if self.args.show_diagram {
            let d = b.display();
            self.out(&d);
            self.out("");
        }

        if self.args.virt {
            let p = virtual_homfly::<R>(&b, &config)?;
            let p = self.format(p.value());
            self.out(&format!("HOMFLY polynomial (experimental) = {p}"));
        } else {
            let mut s = SkeinResolver::<R>::new(config);
            let p = s.compute(&b)?;

            info!("nodes: {}, cache hits: {}", s.nodes(), s.cache_hits());

            if self.args.show_trace {
                let t = s.take_trace();
                self.show_trace(&t);
            }

            let p = self.format(&p);
            self.out(&format!("HOMFLY polynomial = {p}"));
        }

        Ok(self.flush())
    }

    fn config(&self) -> HomflyConfig {
        HomflyConfig {
            max_depth: self.args.max_depth,
            max_nodes: self.args.max_nodes.or(Some(HomflyConfig::DEFAULT_MAX_NODES)),
            use_cache: self.args.cache,
            virtual_mode: self.args.virt,
            record_trace: self.args.show_trace
        }
    }

    fn format<R>(&self, p: &HomflyPoly<R>) -> String
    where R: Ring, for<'x> &'x R: RingOps<R> {
        match self.args.format {
            Format::Unicode => p.to_string(),
            Format::Ascii   => p.to_ascii()
        }
    }

    fn show_trace(&mut self, trace: &[TraceEntry]) {
        for e in trace {
            let bad = match e.bad {
                Some(c) => format!("bad {} on component {}", c.crossing, c.component),
                None => "unlink".to_string()
            };
            let record = e.record.iter().join(",");
            self.out(&format!("{}{} [{record}] @{}: {bad}", indent(e.depth), e.braid, e.basepoint));
        }
        self.out("");
    }

    fn out(&mut self, str: &str) {
        self.buff.push_str(str);
        self.buff.push('\n');
    }

    fn flush(&mut self) -> String {
        let res = std::mem::take(&mut self.buff);
        res.trim().to_string()
    }
}
