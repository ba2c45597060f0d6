//! Pipeline simulator CLI and interactive shell.
//!
//! Command-line argument parsing and the REPL that drives the simulator
//! between cycles are kept out of the library: the shell is an external
//! collaborator that only ever calls the `Cpu`'s public accessors.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use rv32i_pipe_sim::config::{self, Config};
use rv32i_pipe_sim::core::Cpu;
use rv32i_pipe_sim::disasm;

/// Command-line arguments for the pipeline simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "RV32I five-stage pipeline simulator")]
struct Args {
    /// Path to a TOML configuration file. Falls back to built-in defaults
    /// if omitted or unreadable.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to a hex-word program file to load before entering the shell.
    #[arg(short, long)]
    program: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => config::load(path).unwrap_or_else(|e| {
            eprintln!("[!] {e}; using default configuration");
            Config::default()
        }),
        None => Config::default(),
    };

    let mut cpu = Cpu::new(&config);

    if let Some(path) = &args.program {
        if let Err(e) = cpu.load_program(path) {
            eprintln!("[!] {e}");
            process::exit(1);
        }
    }

    println!("------------------------------------------------------------------");
    println!("RV32I pipeline simulator. Type '?' for a list of commands.");
    println!("------------------------------------------------------------------");

    shell_loop(&mut cpu);
}

fn shell_loop(cpu: &mut Cpu) {
    let stdin = io::stdin();
    loop {
        print!("PIPE-SIM:> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }

        let mut tokens = line.split_whitespace();
        let Some(cmd) = tokens.next() else { continue };

        match cmd.to_ascii_lowercase().as_str() {
            "sim" => {
                cpu.run_all();
                println!("Simulation complete.");
                cpu.stats.print();
            }
            "show" | "sh" => print!("{}", disasm::format_pipeline_dump(cpu)),
            "run" => {
                let Some(n) = tokens.next().and_then(|t| t.parse::<u64>().ok()) else {
                    eprintln!("usage: run <n>");
                    continue;
                };
                cpu.run(n);
                println!("Ran {n} cycles.");
                cpu.stats.print();
            }
            "rdump" => print!("{}", disasm::format_register_dump(cpu)),
            "reset" => {
                cpu.reset();
                println!("Simulator reset.");
            }
            "mdump" => {
                let (Some(start), Some(stop)) = (
                    tokens.next().and_then(|t| parse_hex(t)),
                    tokens.next().and_then(|t| parse_hex(t)),
                ) else {
                    eprintln!("usage: mdump <start> <stop>");
                    continue;
                };
                let n_words = stop.saturating_sub(start) / 4 + 1;
                print!("{}", disasm::format_memory_dump(cpu, start, n_words));
            }
            "high" => {
                let Some(v) = tokens.next().and_then(|t| parse_hex(t)) else {
                    eprintln!("usage: high <val>");
                    continue;
                };
                cpu.set_hi(v);
            }
            "low" => {
                let Some(v) = tokens.next().and_then(|t| parse_hex(t)) else {
                    eprintln!("usage: low <val>");
                    continue;
                };
                cpu.set_lo(v);
            }
            "print" => {
                println!("Program loaded at text base; inspect with mdump.");
            }
            "input" => {
                let (Some(reg), Some(val)) = (
                    tokens.next().and_then(|t| t.parse::<usize>().ok()),
                    tokens.next().and_then(|t| parse_hex(t)),
                ) else {
                    eprintln!("usage: input <reg> <val>");
                    continue;
                };
                if reg >= 32 {
                    eprintln!("register out of range: {reg}");
                    continue;
                }
                cpu.set_register(reg, val);
            }
            "forwarding" => {
                let Some(v) = tokens.next().and_then(|t| t.parse::<u32>().ok()) else {
                    eprintln!("usage: forwarding <0-1>");
                    continue;
                };
                cpu.set_forwarding(v != 0);
                println!("Forwarding {}", if v != 0 { "ON" } else { "OFF" });
            }
            "?" | "help" => print_help(),
            "quit" | "q" => {
                println!("**************************");
                println!("Exiting. Good bye...");
                println!("**************************");
                break;
            }
            _ => println!("Invalid Command."),
        }
    }
}

fn parse_hex(token: &str) -> Option<u32> {
    let digits = token.trim_start_matches("0x").trim_start_matches("0X");
    u32::from_str_radix(digits, 16).ok()
}

fn print_help() {
    println!("------------------------------------------------------------------");
    println!("sim\t\t\t-- simulate the program to completion");
    println!("run <n>\t\t\t-- simulate for <n> cycles");
    println!("rdump\t\t\t-- dump register values");
    println!("reset\t\t\t-- clear registers/memory and reload the program");
    println!("input <reg> <val>\t-- set GPR <reg> to <val> (hex)");
    println!("mdump <start> <stop>\t-- dump memory from <start> to <stop> (hex)");
    println!("high <val>\t\t-- set the HI register to <val> (hex)");
    println!("low <val>\t\t-- set the LO register to <val> (hex)");
    println!("print\t\t\t-- print the program loaded into memory");
    println!("show\t\t\t-- print the current pipeline latches");
    println!("forwarding <0-1>\t-- turn data forwarding on/off");
    println!("?\t\t\t-- display this help menu");
    println!("quit\t\t\t-- exit the simulator");
    println!("------------------------------------------------------------------");
}
