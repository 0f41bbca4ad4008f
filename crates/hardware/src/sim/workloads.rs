//! Benchmark workloads.
//!
//! Each workload re-creates the conditional-branch stream of one benchmark
//! program and computes the same checksum the program stores on completion.
//! Branch sites sit at fixed, word-aligned synthetic addresses so that
//! streams are reproducible and table indexing behaves like it would for
//! real code:
//! 1. **pattern:** A T,T,N repeating branch inside a 100-iteration loop.
//! 2. **aliasing:** Four look-alike loops whose back-edges share one index in an 8-entry table.
//! 3. **complex:** Correlated loops, a bit-test chain, and interleaved helper functions.
//! 4. **fibonacci:** The base-case test of a doubly recursive `fib(20)`.
//! 5. **bubblesort:** Sorting and verifying 50 pseudo-random values.
//! 6. **factorial:** `5!` computed with a shift-and-add software multiply.
//!
//! Every loop condition is one branch event per evaluation: taken while the
//! loop continues, not-taken on exit. An `if` condition is likewise recorded
//! as taken when the condition holds, i.e. the source-level outcome. A
//! compiler that branches around the `if` body would emit the opposite
//! direction at that site.

use std::fmt;
use std::str::FromStr;

use crate::common::error::WorkloadError;
use crate::sim::trace::BranchEvent;

/// Branch-site addresses, grouped per benchmark.
mod sites {
    pub const PATTERN_LOOP: u64 = 0x10010;
    pub const PATTERN_WRAP: u64 = 0x10018;
    pub const PATTERN_TEST: u64 = 0x10024;

    // Back-edges 0x100 bytes apart: identical index bits for tables up to 64 entries.
    pub const ALIAS_LOOP_A: u64 = 0x11000;
    pub const ALIAS_LOOP_B: u64 = 0x11100;
    pub const ALIAS_LOOP_C: u64 = 0x11200;
    pub const ALIAS_LOOP_D: u64 = 0x11300;
    pub const ALIAS_OUTER_1: u64 = 0x11404;
    pub const ALIAS_OUTER_2: u64 = 0x11444;

    pub const CORR_OUTER: u64 = 0x12000;
    pub const CORR_INNER_J: u64 = 0x12010;
    pub const CORR_TEST_J: u64 = 0x12018;
    pub const CORR_INNER_K: u64 = 0x12030;
    pub const CORR_TEST_K: u64 = 0x12038;
    pub const SEQ_LOOP: u64 = 0x12100;
    pub const SEQ_BIT0: u64 = 0x12108;
    pub const SEQ_BIT1: u64 = 0x12110;
    pub const SEQ_BIT2: u64 = 0x12118;
    pub const SEQ_BIT3: u64 = 0x12120;
    pub const SEQ_LOW_0: u64 = 0x12128;
    pub const SEQ_LOW_1: u64 = 0x12130;
    pub const SEQ_LOW_2: u64 = 0x12138;
    pub const SEQ_LOW_3: u64 = 0x12140;
    pub const FUNC_A_LOOP: u64 = 0x12200;
    pub const FUNC_A_TEST: u64 = 0x12208;
    pub const FUNC_B_LOOP: u64 = 0x12240;
    pub const FUNC_B_TEST: u64 = 0x12248;
    pub const FUNC_C_LOOP: u64 = 0x12280;
    pub const FUNC_C_TEST: u64 = 0x12288;
    pub const COMPLEX_MAIN_SEQ: u64 = 0x12300;
    pub const COMPLEX_MAIN_FUNCS: u64 = 0x12310;

    pub const FIB_BASE: u64 = 0x13008;

    pub const SORT_OUTER: u64 = 0x14000;
    pub const SORT_INNER: u64 = 0x14010;
    pub const SORT_COMPARE: u64 = 0x1401c;
    pub const VERIFY_LOOP: u64 = 0x14100;
    pub const VERIFY_COMPARE: u64 = 0x1410c;

    pub const MUL_LOOP: u64 = 0x15000;
    pub const MUL_BIT: u64 = 0x15008;
    pub const FACT_LOOP: u64 = 0x15100;
}

/// Benchmark programs whose branch streams can be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Workload {
    /// Repeating taken, taken, not-taken branch.
    Pattern,
    /// Loops aliasing in a small table.
    Aliasing,
    /// History-correlated branches.
    Complex,
    /// Recursive Fibonacci.
    Fibonacci,
    /// Bubble sort plus verification.
    BubbleSort,
    /// Factorial with software multiply.
    Factorial,
}

/// Branch stream and checksum produced by running a workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadRun {
    /// Resolved conditional branches in program order.
    pub events: Vec<BranchEvent>,
    /// Value the benchmark program would store as its result.
    pub checksum: i64,
}

impl Workload {
    /// All workloads, in listing order.
    pub const ALL: [Self; 6] = [
        Self::Pattern,
        Self::Aliasing,
        Self::Complex,
        Self::Fibonacci,
        Self::BubbleSort,
        Self::Factorial,
    ];

    /// Name used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::Aliasing => "aliasing",
            Self::Complex => "complex",
            Self::Fibonacci => "fibonacci",
            Self::BubbleSort => "bubblesort",
            Self::Factorial => "factorial",
        }
    }

    /// One-line description for listings.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Pattern => "T,T,N repeating branch in a 100-iteration loop",
            Self::Aliasing => "four loops colliding in a small table, two call orders",
            Self::Complex => "correlated loops, bit-test chains, interleaved functions",
            Self::Fibonacci => "base-case test of recursive fib(20)",
            Self::BubbleSort => "sort and verify 50 pseudo-random integers",
            Self::Factorial => "5! via shift-and-add multiply",
        }
    }

    /// Runs the workload and returns its branch stream and checksum.
    pub fn run(self) -> WorkloadRun {
        let mut rec = Recorder::default();
        let checksum = match self {
            Self::Pattern => pattern(&mut rec),
            Self::Aliasing => aliasing(&mut rec),
            Self::Complex => complex(&mut rec),
            Self::Fibonacci => fib(&mut rec, 20),
            Self::BubbleSort => bubblesort(&mut rec),
            Self::Factorial => factorial(&mut rec, 5),
        };
        WorkloadRun {
            events: rec.events,
            checksum,
        }
    }

    /// Convenience wrapper returning only the branch stream.
    pub fn events(self) -> Vec<BranchEvent> {
        self.run().events
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Workload {
    type Err = WorkloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|w| w.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| WorkloadError::Unknown {
                name: s.to_string(),
                expected: Self::ALL.map(Self::name).join(", "),
            })
    }
}

/// Collects branch outcomes while a benchmark body executes.
#[derive(Debug, Default)]
struct Recorder {
    events: Vec<BranchEvent>,
}

impl Recorder {
    /// Records the branch at `pc` resolving to `cond` and passes `cond` through.
    #[inline]
    fn branch(&mut self, pc: u64, cond: bool) -> bool {
        self.events.push(BranchEvent::new(pc, cond));
        cond
    }
}

fn pattern(rec: &mut Recorder) -> i64 {
    let mut result = 0;
    let mut state = 0;
    let mut i = 0;
    while rec.branch(sites::PATTERN_LOOP, i < 100) {
        state += 1;
        if rec.branch(sites::PATTERN_WRAP, state == 3) {
            state = 0;
        }
        if rec.branch(sites::PATTERN_TEST, state != 0) {
            result += 1;
        }
        i += 1;
    }
    result
}

/// Sums `i * scale` for `i` in `0..n` with its loop branch at `site`.
fn scaled_sum(rec: &mut Recorder, site: u64, n: i64, scale: i64) -> i64 {
    let mut sum = 0;
    let mut i = 0;
    while rec.branch(site, i < n) {
        sum += i * scale;
        i += 1;
    }
    sum
}

fn aliasing(rec: &mut Recorder) -> i64 {
    const ITERATIONS: i64 = 100;
    let mut result = 0;

    let mut i = 0;
    while rec.branch(sites::ALIAS_OUTER_1, i < ITERATIONS) {
        result += scaled_sum(rec, sites::ALIAS_LOOP_A, 10, 1);
        result += scaled_sum(rec, sites::ALIAS_LOOP_B, 10, 2);
        result += scaled_sum(rec, sites::ALIAS_LOOP_C, 10, 3);
        result += scaled_sum(rec, sites::ALIAS_LOOP_D, 10, 4);
        i += 1;
    }

    let mut i = 0;
    while rec.branch(sites::ALIAS_OUTER_2, i < ITERATIONS) {
        result += scaled_sum(rec, sites::ALIAS_LOOP_A, 8, 1);
        result += scaled_sum(rec, sites::ALIAS_LOOP_C, 8, 3);
        result += scaled_sum(rec, sites::ALIAS_LOOP_B, 8, 2);
        result += scaled_sum(rec, sites::ALIAS_LOOP_D, 8, 4);
        i += 1;
    }
    result
}

/// Inner loop alternating `-step, +step` on odd/even indices.
fn alternating(rec: &mut Recorder, loop_site: u64, test_site: u64, n: i64, step: i64) -> i64 {
    let mut sum = 0;
    let mut j = 0;
    while rec.branch(loop_site, j < n) {
        if rec.branch(test_site, j & 1 != 0) {
            sum += step;
        } else {
            sum -= step;
        }
        j += 1;
    }
    sum
}

fn correlated_loops(rec: &mut Recorder) -> i64 {
    const OUTER: i64 = 50;
    const INNER: i64 = 20;
    let mut sum = 0;
    let mut i = 0;
    while rec.branch(sites::CORR_OUTER, i < OUTER) {
        sum += alternating(rec, sites::CORR_INNER_J, sites::CORR_TEST_J, INNER, 1);
        sum += alternating(rec, sites::CORR_INNER_K, sites::CORR_TEST_K, INNER, 2);
        i += 1;
    }
    sum
}

fn sequential_branches(rec: &mut Recorder, n: i64) -> i64 {
    let mut sum = 0;
    let mut i = 0;
    while rec.branch(sites::SEQ_LOOP, i < n) {
        if rec.branch(sites::SEQ_BIT0, i & 1 != 0) {
            sum += 1;
        }
        if rec.branch(sites::SEQ_BIT1, i & 2 != 0) {
            sum += 2;
        }
        if rec.branch(sites::SEQ_BIT2, i & 4 != 0) {
            sum += 4;
        }
        if rec.branch(sites::SEQ_BIT3, i & 8 != 0) {
            sum += 8;
        }
        if rec.branch(sites::SEQ_LOW_0, i & 3 == 0) {
            sum += 10;
        }
        if rec.branch(sites::SEQ_LOW_1, i & 3 == 1) {
            sum += 20;
        }
        if rec.branch(sites::SEQ_LOW_2, i & 3 == 2) {
            sum += 30;
        }
        if rec.branch(sites::SEQ_LOW_3, i & 3 == 3) {
            sum += 40;
        }
        i += 1;
    }
    sum
}

/// Adds `i` when `pick(i)` holds, subtracts it otherwise.
fn split_sum(
    rec: &mut Recorder,
    loop_site: u64,
    test_site: u64,
    n: i64,
    pick: impl Fn(i64) -> bool,
) -> i64 {
    let mut sum = 0;
    let mut i = 0;
    while rec.branch(loop_site, i < n) {
        if rec.branch(test_site, pick(i)) {
            sum += i;
        } else {
            sum -= i;
        }
        i += 1;
    }
    sum
}

fn complex(rec: &mut Recorder) -> i64 {
    let mut result = correlated_loops(rec);

    let mut i = 0;
    while rec.branch(sites::COMPLEX_MAIN_SEQ, i < 10) {
        result += sequential_branches(rec, 32);
        i += 1;
    }

    let mut i = 0;
    while rec.branch(sites::COMPLEX_MAIN_FUNCS, i < 30) {
        let n = 8;
        result += split_sum(rec, sites::FUNC_A_LOOP, sites::FUNC_A_TEST, n, |i| i < n / 2);
        result += split_sum(rec, sites::FUNC_B_LOOP, sites::FUNC_B_TEST, n, |i| i >= n / 2);
        result += split_sum(rec, sites::FUNC_C_LOOP, sites::FUNC_C_TEST, n, |i| (i & 3) < 2);
        i += 1;
    }
    result
}

fn fib(rec: &mut Recorder, n: i64) -> i64 {
    if rec.branch(sites::FIB_BASE, n <= 1) {
        return n;
    }
    fib(rec, n - 1) + fib(rec, n - 2)
}

/// Number of elements sorted by the bubblesort workload.
const SORT_SIZE: usize = 50;

/// Deterministic input data: xorshift64 values reduced to 0..1000.
fn sort_data() -> [i64; SORT_SIZE] {
    let mut state: u64 = 123456789;
    let mut data = [0; SORT_SIZE];
    for slot in &mut data {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        *slot = (state % 1000) as i64;
    }
    data
}

fn bubblesort(rec: &mut Recorder) -> i64 {
    let mut arr = sort_data();
    let n = arr.len();

    let mut i = 0;
    while rec.branch(sites::SORT_OUTER, i < n - 1) {
        let mut j = 0;
        while rec.branch(sites::SORT_INNER, j < n - i - 1) {
            if rec.branch(sites::SORT_COMPARE, arr[j] > arr[j + 1]) {
                arr.swap(j, j + 1);
            }
            j += 1;
        }
        i += 1;
    }

    let mut i = 0;
    while rec.branch(sites::VERIFY_LOOP, i < n - 1) {
        if rec.branch(sites::VERIFY_COMPARE, arr[i] > arr[i + 1]) {
            return 0;
        }
        i += 1;
    }
    1
}

fn mul(rec: &mut Recorder, mut a: i64, mut b: i64) -> i64 {
    let mut result = 0;
    while rec.branch(sites::MUL_LOOP, b > 0) {
        if rec.branch(sites::MUL_BIT, b & 1 != 0) {
            result += a;
        }
        a <<= 1;
        b >>= 1;
    }
    result
}

fn factorial(rec: &mut Recorder, n: i64) -> i64 {
    let mut result = 1;
    let mut i = 2;
    while rec.branch(sites::FACT_LOOP, i <= n) {
        result = mul(rec, result, i);
        i += 1;
    }
    result
}
