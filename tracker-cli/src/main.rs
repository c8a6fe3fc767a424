use std::{
    fmt,
    io::{self, BufRead, Write},
};

use clap::{App, Arg};
use once_cell::sync::Lazy;
use regex::Regex;

use battletracker::battle::{CellStatus, Coordinate, Orientation};
use battletracker::service::BattleService;

fn main() -> io::Result<()> {
    let matches = App::new("Battle Tracker")
        .version("1.0")
        .about("Interactive driver for the battleship state tracker.")
        .arg(
            Arg::with_name("log_filter")
                .short("l")
                .long("log")
                .value_name("FILTER")
                .help("tracing filter directive, e.g. battletracker=debug")
                .takes_value(true),
        )
        .get_matches();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(matches.value_of("log_filter").unwrap_or("warn"))
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let service = BattleService::new();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();

    // The battle currently being driven. Commands that need a battle operate
    // on this one; `new` replaces it.
    let mut current: Option<String> = None;

    enum Command {
        New(usize, usize, usize),
        Place(Coordinate, Orientation),
        Attack(Coordinate),
        Status,
        Show,
        Battles,
        Help,
        Quit,
    }

    println!("Battleship state tracker. Type help or ? for commands.");
    loop {
        static NEW: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"^(?x)(?:new|create)\s+
        (?P<dim>[0-9]+)\s+
        (?P<ships>[0-9]+)\s+
        (?P<len>[0-9]+)$",
            )
            .unwrap()
        });
        static PLACE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"^(?x)(?:place|put)\s+
        (?P<column>[0-9]+)(?:\s*,\s*|\s+)(?P<row>[0-9]+)\s+
        (?P<dir>\w+)$",
            )
            .unwrap()
        });
        static ATTACK: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"^(?x)(?:attack|fire|shoot)\s+
        (?P<column>[0-9]+)(?:\s*,\s*|\s+)(?P<row>[0-9]+)$",
            )
            .unwrap()
        });

        let cmd = read_command(&mut input, &mut line, |input| match input {
            "?" | "help" | "h" => Some(Command::Help),
            "status" => Some(Command::Status),
            "show" | "board" => Some(Command::Show),
            "battles" | "list" => Some(Command::Battles),
            "quit" | "exit" | "q" => Some(Command::Quit),
            other => {
                if let Some(captures) = NEW.captures(other) {
                    let dim = captures.name("dim").unwrap().as_str().parse().ok()?;
                    let ships = captures.name("ships").unwrap().as_str().parse().ok()?;
                    let len = captures.name("len").unwrap().as_str().parse().ok()?;
                    Some(Command::New(dim, ships, len))
                } else if let Some(captures) = PLACE.captures(other) {
                    let coord = parse_coord(&captures)?;
                    let dir = match captures.name("dir").unwrap().as_str().parse() {
                        Ok(dir) => dir,
                        Err(_) => {
                            println!("invalid direction, choose \"horizontal\" or \"vertical\"");
                            return None;
                        }
                    };
                    Some(Command::Place(coord, dir))
                } else if let Some(captures) = ATTACK.captures(other) {
                    Some(Command::Attack(parse_coord(&captures)?))
                } else {
                    println!("Invalid command \"{}\". Use '?' for help.", other);
                    None
                }
            }
        })?;

        match cmd {
            Command::New(dim, ships, len) => match service.create_battle(dim, ships, len) {
                Ok(summary) => {
                    println!(
                        "Battle {} created: {}x{} grid, {} ships of length {}.",
                        summary.id, dim, dim, ships, len
                    );
                    current = Some(summary.id.to_string());
                }
                Err(err) => println!("{}", err),
            },
            Command::Place(coord, dir) => match current.as_deref() {
                None => println!("No battle yet; use \"new <dim> <ships> <len>\" first."),
                Some(id) => match service.place_ship(id, coord, dir) {
                    Ok(ship) => println!(
                        "Ship placed on {} cells starting at {}.",
                        ship.len(),
                        ship.anchor()
                    ),
                    Err(err) => println!("{}", err),
                },
            },
            Command::Attack(coord) => match current.as_deref() {
                None => println!("No battle yet; use \"new <dim> <ships> <len>\" first."),
                Some(id) => match service.attack(id, coord) {
                    Ok(result) => {
                        println!("{}: {:?}", coord, result.attacked_cell_status);
                        if result.all_ships_sunk {
                            println!("Game over! All ships have been sunk.");
                        }
                    }
                    Err(err) => println!("{}", err),
                },
            },
            Command::Status => match current.as_deref() {
                None => println!("No battle yet."),
                Some(id) => match service.battle_status(id) {
                    Ok(status) => println!("Battle {} is {}.", id, status),
                    Err(err) => println!("{}", err),
                },
            },
            Command::Show => match current.as_deref() {
                None => println!("No battle yet."),
                Some(id) => show_battle(&service, id),
            },
            Command::Battles => {
                if service.directory().is_empty() {
                    println!("No battles.");
                }
                for id in service.directory().ids() {
                    let status = service
                        .battle_status(&id.to_string())
                        .map(|status| status.to_string())
                        .unwrap_or_else(|err| err.to_string());
                    let marker = if current.as_deref() == Some(id.to_string().as_str()) {
                        "*"
                    } else {
                        " "
                    };
                    println!(" {} {} {}", marker, id, status);
                }
            }
            Command::Help => {
                println!(
                    "Available Commands:
    new <dim> <ships> <len>     create a battle with a <dim>x<dim> grid and
        <ships> ships of length <len>; it becomes the current battle.
    place <column>,<row> <dir>  place a ship anchored at the coordinate.
        Possible directions are \"horizontal\" (\"h\") and \"vertical\" (\"v\").
    attack <column>,<row>       attack the coordinate on the current battle.
    status                      print the current battle's status.
    show                        print the current battle's board.
    battles                     list all battles in the directory.
    quit                        exit.",
                );
            }
            Command::Quit => break,
        }
    }
    Ok(())
}

/// Pull the `column`/`row` captures out of a command match.
fn parse_coord(captures: &regex::Captures) -> Option<Coordinate> {
    let column = match captures.name("column").unwrap().as_str().parse() {
        Ok(column) => column,
        Err(_) => {
            println!("invalid column: {}", captures.name("column").unwrap().as_str());
            return None;
        }
    };
    let row = match captures.name("row").unwrap().as_str().parse() {
        Ok(row) => row,
        Err(_) => {
            println!("invalid row: {}", captures.name("row").unwrap().as_str());
            return None;
        }
    };
    Some(Coordinate::new(column, row))
}

/// Print the full board of the identified battle, ships revealed.
fn show_battle(service: &BattleService, id: &str) {
    struct Cell(CellStatus);
    impl fmt::Display for Cell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.pad(match self.0 {
                CellStatus::Empty => "~",
                CellStatus::Ship => "O",
                CellStatus::Hit => "X",
                CellStatus::Miss => "x",
            })
        }
    }

    let shared = match id.parse().ok().and_then(|id| service.directory().find(&id)) {
        Some(shared) => shared,
        None => {
            println!("no battle exists with id {}", id);
            return;
        }
    };
    let battle = shared.lock().unwrap();
    let grid = battle.grid();

    print!("   ");
    for column in 0..grid.dimension() {
        print!("{:^4}", column);
    }
    println!();
    for row in 0..grid.dimension() {
        print!("{:>2} ", row);
        for column in 0..grid.dimension() {
            // Every (column, row) in range is a valid cell.
            let cell = grid.get(Coordinate::new(column, row)).unwrap();
            print!("{:^4}", Cell(cell.status()));
        }
        println!();
    }
    println!(
        "Status: {}, ships placed: {}/{}",
        battle.status(),
        grid.ships().len(),
        grid.number_of_ships()
    );
}

/// Prompt for commands until the checker accepts one. Each line is lowercased
/// and trimmed before checking; end of input exits the process cleanly.
fn read_command<T>(
    read: &mut impl BufRead,
    buf: &mut String,
    mut checker: impl FnMut(&str) -> Option<T>,
) -> io::Result<T> {
    loop {
        print!("> ");
        io::stdout().flush()?;
        buf.clear();
        if read.read_line(buf)? == 0 {
            println!();
            std::process::exit(0);
        }
        buf.make_ascii_lowercase();
        if let Some(val) = checker(buf.trim()) {
            return Ok(val);
        }
    }
}
