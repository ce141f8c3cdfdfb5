use crate::storage::{Bind, CustomDbRow, Record, RowExt, RowValues, TableSpec, coalesce, key, replace};
use std::collections::BTreeMap;
use std::ops::AddAssign;

/// Counting stats shared by every box-score style table.
///
/// `StatLine<Option<i64>>` is one raw line as the API reported it;
/// `StatLine<i64>` is a total where missing values counted as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatLine<T> {
    pub points: T,
    pub time_played: T,
    pub valuation: T,
    pub field_goals_2_made: T,
    pub field_goals_2_attempted: T,
    pub field_goals_3_made: T,
    pub field_goals_3_attempted: T,
    pub free_throws_made: T,
    pub free_throws_attempted: T,
    pub total_rebounds: T,
    pub offensive_rebounds: T,
    pub defensive_rebounds: T,
    pub assists: T,
    pub steals: T,
    pub turnovers: T,
    pub blocks_favour: T,
    pub blocks_against: T,
    pub fouls_committed: T,
    pub fouls_received: T,
    pub plus_minus: T,
}

pub const STAT_LINE_LEN: usize = 20;

impl<T: Copy> StatLine<T> {
    /// Field values in declaration order.
    pub fn to_array(&self) -> [T; STAT_LINE_LEN] {
        [
            self.points,
            self.time_played,
            self.valuation,
            self.field_goals_2_made,
            self.field_goals_2_attempted,
            self.field_goals_3_made,
            self.field_goals_3_attempted,
            self.free_throws_made,
            self.free_throws_attempted,
            self.total_rebounds,
            self.offensive_rebounds,
            self.defensive_rebounds,
            self.assists,
            self.steals,
            self.turnovers,
            self.blocks_favour,
            self.blocks_against,
            self.fouls_committed,
            self.fouls_received,
            self.plus_minus,
        ]
    }

    pub fn from_array(v: [T; STAT_LINE_LEN]) -> Self {
        let [
            points,
            time_played,
            valuation,
            field_goals_2_made,
            field_goals_2_attempted,
            field_goals_3_made,
            field_goals_3_attempted,
            free_throws_made,
            free_throws_attempted,
            total_rebounds,
            offensive_rebounds,
            defensive_rebounds,
            assists,
            steals,
            turnovers,
            blocks_favour,
            blocks_against,
            fouls_committed,
            fouls_received,
            plus_minus,
        ] = v;
        Self {
            points,
            time_played,
            valuation,
            field_goals_2_made,
            field_goals_2_attempted,
            field_goals_3_made,
            field_goals_3_attempted,
            free_throws_made,
            free_throws_attempted,
            total_rebounds,
            offensive_rebounds,
            defensive_rebounds,
            assists,
            steals,
            turnovers,
            blocks_favour,
            blocks_against,
            fouls_committed,
            fouls_received,
            plus_minus,
        }
    }

    fn sql_values(&self) -> impl Iterator<Item = RowValues>
    where
        T: Bind,
    {
        self.to_array().into_iter().map(|v| v.bind())
    }
}

impl StatLine<Option<i64>> {
    #[must_use]
    pub fn totals(&self) -> StatLine<i64> {
        StatLine::from_array(self.to_array().map(|v| v.unwrap_or(0)))
    }

    /// Reads a stored line back; `columns` names the table's columns in
    /// declaration order.
    #[must_use]
    pub fn from_row(row: &CustomDbRow, columns: &[&str; STAT_LINE_LEN]) -> Self {
        Self::from_array(columns.map(|c| row.get_int(c)))
    }
}

impl StatLine<i64> {
    #[must_use]
    pub fn field_goals_total_made(&self) -> i64 {
        self.field_goals_2_made + self.field_goals_3_made
    }

    #[must_use]
    pub fn field_goals_total_attempted(&self) -> i64 {
        self.field_goals_2_attempted + self.field_goals_3_attempted
    }

    /// Categories with ten or more: points, rebounds, assists, steals, blocks.
    #[must_use]
    pub fn double_digit_categories(&self) -> usize {
        [
            self.points,
            self.total_rebounds,
            self.assists,
            self.steals,
            self.blocks_favour,
        ]
        .iter()
        .filter(|v| **v >= 10)
        .count()
    }
}

impl AddAssign for StatLine<i64> {
    fn add_assign(&mut self, rhs: Self) {
        let mut sum = self.to_array();
        for (acc, v) in sum.iter_mut().zip(rhs.to_array()) {
            *acc += v;
        }
        *self = Self::from_array(sum);
    }
}

/// Column names of `player_game_stats` in `StatLine` order.
pub const PLAYER_GAME_STAT_COLUMNS: [&str; STAT_LINE_LEN] = [
    "points",
    "minutes_played",
    "pir",
    "field_goals_2_made",
    "field_goals_2_attempted",
    "field_goals_3_made",
    "field_goals_3_attempted",
    "free_throws_made",
    "free_throws_attempted",
    "total_rebounds",
    "offensive_rebounds",
    "defensive_rebounds",
    "assists",
    "steals",
    "turnovers",
    "blocks_favour",
    "blocks_against",
    "fouls_committed",
    "fouls_received",
    "plus_minus",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerGameStat {
    pub gamecode: String,
    pub person_code: String,
    pub team_code: Option<String>,
    pub dorsal: Option<i64>,
    pub position: Option<i64>,
    pub position_name: Option<String>,
    pub starting_five: Option<bool>,
    pub stats: StatLine<Option<i64>>,
}

impl Record for PlayerGameStat {
    // later endpoints may fill gaps but never blank a value
    const SPEC: &'static TableSpec = &TableSpec {
        table: "player_game_stats",
        columns: &[
            key("gamecode"),
            key("person_code"),
            coalesce("team_code"),
            coalesce("dorsal"),
            coalesce("position"),
            coalesce("position_name"),
            coalesce("starting_five"),
            coalesce("points"),
            coalesce("minutes_played"),
            coalesce("pir"),
            coalesce("field_goals_2_made"),
            coalesce("field_goals_2_attempted"),
            coalesce("field_goals_3_made"),
            coalesce("field_goals_3_attempted"),
            coalesce("free_throws_made"),
            coalesce("free_throws_attempted"),
            coalesce("total_rebounds"),
            coalesce("offensive_rebounds"),
            coalesce("defensive_rebounds"),
            coalesce("assists"),
            coalesce("steals"),
            coalesce("turnovers"),
            coalesce("blocks_favour"),
            coalesce("blocks_against"),
            coalesce("fouls_committed"),
            coalesce("fouls_received"),
            coalesce("plus_minus"),
        ],
    };

    fn values(&self) -> Vec<RowValues> {
        let mut values = vec![
            self.gamecode.bind(),
            self.person_code.bind(),
            self.team_code.bind(),
            self.dorsal.bind(),
            self.position.bind(),
            self.position_name.bind(),
            self.starting_five.bind(),
        ];
        values.extend(self.stats.sql_values());
        values
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamGameStat {
    pub gamecode: String,
    pub team_code: String,
    pub totals: StatLine<i64>,
    /// Points per quarter, `None` when the game feed has no partials.
    pub quarters: [Option<i64>; 4],
    /// Overtime partials as JSON text.
    pub extra_periods: Option<String>,
}

impl TeamGameStat {
    /// Sums the stored player lines of one team in one game.
    #[must_use]
    pub fn from_player_lines(
        gamecode: &str,
        team_code: &str,
        lines: &[StatLine<Option<i64>>],
    ) -> Self {
        let mut totals = StatLine::<i64>::default();
        for line in lines {
            totals += line.totals();
        }
        Self {
            gamecode: gamecode.to_string(),
            team_code: team_code.to_string(),
            totals,
            quarters: [None; 4],
            extra_periods: None,
        }
    }
}

impl Record for TeamGameStat {
    const SPEC: &'static TableSpec = &TableSpec {
        table: "team_game_stats",
        columns: &[
            key("gamecode"),
            key("team_code"),
            replace("points"),
            replace("time_played"),
            replace("valuation"),
            replace("field_goals_2_made"),
            replace("field_goals_2_attempted"),
            replace("field_goals_3_made"),
            replace("field_goals_3_attempted"),
            replace("free_throws_made"),
            replace("free_throws_attempted"),
            replace("total_rebounds"),
            replace("offensive_rebounds"),
            replace("defensive_rebounds"),
            replace("assists"),
            replace("steals"),
            replace("turnovers"),
            replace("blocks_favour"),
            replace("blocks_against"),
            replace("fouls_committed"),
            replace("fouls_received"),
            replace("plus_minus"),
            replace("field_goals_total_made"),
            replace("field_goals_total_attempted"),
            replace("points_q1"),
            replace("points_q2"),
            replace("points_q3"),
            replace("points_q4"),
            replace("extra_periods"),
        ],
    };

    fn values(&self) -> Vec<RowValues> {
        let mut values = vec![self.gamecode.bind(), self.team_code.bind()];
        values.extend(self.totals.sql_values());
        values.push(self.totals.field_goals_total_made().bind());
        values.push(self.totals.field_goals_total_attempted().bind());
        values.extend(self.quarters.iter().map(Bind::bind));
        values.push(self.extra_periods.bind());
        values
    }
}

/// One game from a player's season feed.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerGameLine {
    pub phase_type: String,
    pub team_code: Option<String>,
    pub started: bool,
    pub stats: StatLine<Option<i64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSeasonStat {
    pub season_code: String,
    pub person_code: String,
    pub phase_type: String,
    pub team_code: Option<String>,
    pub games_played: i64,
    pub games_started: i64,
    pub totals: StatLine<i64>,
    pub wins: Option<i64>,
    pub losses: Option<i64>,
    pub double_doubles: i64,
    pub triple_doubles: i64,
}

impl PlayerSeasonStat {
    /// Folds a player's game lines into one row per phase, ordered by phase
    /// code. The team is the one of the first game seen in the phase.
    #[must_use]
    pub fn aggregate(season_code: &str, person_code: &str, games: &[PlayerGameLine]) -> Vec<Self> {
        let mut by_phase: BTreeMap<&str, Self> = BTreeMap::new();
        for game in games {
            let entry = by_phase
                .entry(game.phase_type.as_str())
                .or_insert_with(|| Self {
                    season_code: season_code.to_string(),
                    person_code: person_code.to_string(),
                    phase_type: game.phase_type.clone(),
                    team_code: game.team_code.clone(),
                    games_played: 0,
                    games_started: 0,
                    totals: StatLine::default(),
                    wins: None,
                    losses: None,
                    double_doubles: 0,
                    triple_doubles: 0,
                });
            let line = game.stats.totals();
            let categories = line.double_digit_categories();
            entry.games_played += 1;
            entry.games_started += i64::from(game.started);
            entry.double_doubles += i64::from(categories >= 2);
            entry.triple_doubles += i64::from(categories >= 3);
            entry.totals += line;
        }
        by_phase.into_values().collect()
    }
}

impl Record for PlayerSeasonStat {
    const SPEC: &'static TableSpec = &TableSpec {
        table: "player_season_stats",
        columns: &[
            key("season_code"),
            key("person_code"),
            key("phase_type"),
            replace("team_code"),
            replace("games_played"),
            replace("games_started"),
            replace("points"),
            replace("minutes_played"),
            replace("pir"),
            replace("field_goals_2_made"),
            replace("field_goals_2_attempted"),
            replace("field_goals_3_made"),
            replace("field_goals_3_attempted"),
            replace("free_throws_made"),
            replace("free_throws_attempted"),
            replace("total_rebounds"),
            replace("offensive_rebounds"),
            replace("defensive_rebounds"),
            replace("assists"),
            replace("steals"),
            replace("turnovers"),
            replace("blocks"),
            replace("blocks_against"),
            replace("fouls_committed"),
            replace("fouls_drawn"),
            replace("plus_minus"),
            replace("wins"),
            replace("losses"),
            replace("double_doubles"),
            replace("triple_doubles"),
        ],
    };

    fn values(&self) -> Vec<RowValues> {
        let mut values = vec![
            self.season_code.bind(),
            self.person_code.bind(),
            self.phase_type.bind(),
            self.team_code.bind(),
            self.games_played.bind(),
            self.games_started.bind(),
        ];
        values.extend(self.totals.sql_values());
        values.push(self.wins.bind());
        values.push(self.losses.bind());
        values.push(self.double_doubles.bind());
        values.push(self.triple_doubles.bind());
        values
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamSeasonStat {
    pub season_code: String,
    pub team_code: String,
    pub games_played: Option<i64>,
    pub stats: StatLine<Option<i64>>,
    pub field_goals_total_made: Option<i64>,
    pub field_goals_total_attempted: Option<i64>,
}

impl Record for TeamSeasonStat {
    const SPEC: &'static TableSpec = &TableSpec {
        table: "team_season_stats",
        columns: &[
            key("season_code"),
            key("team_code"),
            replace("games_played"),
            replace("points"),
            replace("time_played"),
            replace("valuation"),
            replace("field_goals_2_made"),
            replace("field_goals_2_attempted"),
            replace("field_goals_3_made"),
            replace("field_goals_3_attempted"),
            replace("free_throws_made"),
            replace("free_throws_attempted"),
            replace("total_rebounds"),
            replace("offensive_rebounds"),
            replace("defensive_rebounds"),
            replace("assists"),
            replace("steals"),
            replace("turnovers"),
            replace("blocks_favour"),
            replace("blocks_against"),
            replace("fouls_committed"),
            replace("fouls_received"),
            replace("plus_minus"),
            replace("field_goals_total_made"),
            replace("field_goals_total_attempted"),
        ],
    };

    fn values(&self) -> Vec<RowValues> {
        let mut values = vec![
            self.season_code.bind(),
            self.team_code.bind(),
            self.games_played.bind(),
        ];
        values.extend(self.stats.sql_values());
        values.push(self.field_goals_total_made.bind());
        values.push(self.field_goals_total_attempted.bind());
        values
    }
}
