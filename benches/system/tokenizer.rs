use std::hint::black_box;

use criterion::{BatchSize, Criterion, Throughput};
use libtash::system::line::LineBuffer;
use libtash::system::{Args, Control, ShellResult, execute_line};

fn count_args(args: &Args<'_>, _control: &mut Control) -> ShellResult {
    black_box(args.argc());
    ShellResult::Ok
}

fn bench_line(c: &mut Criterion, group_name: &str, text: &[u8]) {
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("execute_line", |b| {
        b.iter_batched_ref(
            || LineBuffer::from_bytes(text).expect("line fits the buffer"),
            |line| {
                let mut control = Control::new();
                execute_line(line, &mut count_args, &mut control)
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

pub fn bench_plain_words(c: &mut Criterion) {
    bench_line(
        c,
        "tokenize_plain",
        b"ifconfig wl1 192.168.0.10 netmask 255.255.255.0 gateway 192.168.0.1 up",
    );
}

pub fn bench_quoted_commands(c: &mut Criterion) {
    bench_line(
        c,
        "tokenize_quoted",
        br#"echo "hello world" a\"b; wifi join "my network" "pass phrase"; date # done"#,
    );
}
