use super::*;
use cue_core::Angle;
use cue_core::CROWD_RADII;
use cue_core::Length;
use cue_core::POCKET_LINE_RADII;
use cue_rules::Colour;
use cue_table::Point;
use cue_table::Rail;
use cue_table::Table;
use cue_table::blocked;
use cue_table::cut;
use cue_table::subtense;
use std::collections::HashSet;
use std::collections::VecDeque;

/// How a candidate shot was generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Kind {
    /// Straight into the best-viewed pocket.
    Direct,
    /// Object ball off one cushion into the pocket.
    Bank,
    /// Cue ball placed behind a nominated ball after a foul.
    FreeBall,
    /// Cue ball off one or more cushions onto an own ball it cannot see.
    Kick,
    /// Soft contact on the own ball nearest the cue.
    Gentle,
}

impl Kind {
    pub fn action(&self) -> Action {
        match self {
            Self::Direct | Self::Bank | Self::FreeBall => Action::Pot,
            Self::Kick | Self::Gentle => Action::Safety,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Bank => write!(f, "bank"),
            Self::FreeBall => write!(f, "free ball"),
            Self::Kick => write!(f, "kick"),
            Self::Gentle => write!(f, "gentle"),
        }
    }
}

/// One shot under consideration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub kind: Kind,
    pub target: usize,
    pub pocket: Option<usize>,
    /// Capture point the object ball is sent to.
    pub entry: Option<Point>,
    pub params: CueParams,
    pub angle: Option<Angle>,
    pub to_target: Length,
    pub to_pocket: Length,
    /// First cushion contact, for banks and kicks.
    pub anchor: Option<Point>,
    /// Where the cue ball is struck from.
    pub cue: Point,
}

impl Candidate {
    pub fn action(&self) -> Action {
        self.kind.action()
    }
    pub fn is_pot(&self) -> bool {
        self.action() == Action::Pot
    }
}

/// Best pocket for an object ball as seen from the cue.
#[derive(Debug, Clone, Copy)]
struct Route {
    pocket: usize,
    entry: Point,
    angle: Angle,
    distance: Length,
    view: Angle,
}

fn clear(state: &TableState, a: &Point, b: &Point, except: &[usize]) -> bool {
    !blocked(a, b, state.obstacles(except).iter(), state.radius(), 1.0)
}

fn pocket_between(table: &Table, cue: &Point, ball: &Point) -> bool {
    let line = *ball - *cue;
    let len = line.norm();
    let dir = line.unit();
    table.pockets().iter().any(|p| {
        let v = *p - *cue;
        let t = v.dot(&dir);
        t > 0.0 && t < len && v.cross(&dir).abs() < table.radius() * POCKET_LINE_RADII
    })
}

fn crowded(state: &TableState, index: usize) -> bool {
    let r = state.radius();
    let at = state.balls()[index].at;
    state
        .balls()
        .iter()
        .enumerate()
        .any(|(i, p)| i != index && p.at.distance(&at) < r * CROWD_RADII)
}

/// Is `hit` strictly on the way from `from` to `to`?
fn ahead(from: &Point, hit: &Point, to: &Point) -> bool {
    (*hit - *from).dot(&(*to - *from)) > 0.0 && from.distance(hit) < from.distance(to)
}

fn on_cushion(table: &Table, hit: &Point, rail: Rail) -> bool {
    match rail {
        Rail::Left | Rail::Right => (0.0..=table.height()).contains(&hit.y),
        Rail::Top | Rail::Bottom => (0.0..=table.width()).contains(&hit.x),
    }
}

fn route(state: &TableState, cue: &Point, target: usize) -> Option<Route> {
    let at = state.ball(target)?.at;
    let r = state.radius();
    let mut best: Option<Route> = None;
    for (pocket, mouth) in state.table().pockets().iter().enumerate() {
        let entry = state.table().entry(*mouth);
        if !clear(state, &at, &entry, &[target]) {
            continue;
        }
        let distance = at.distance(&entry);
        let candidate = Route {
            pocket,
            entry,
            angle: cut(cue, &at, &entry),
            distance,
            view: subtense(distance, r),
        };
        let better = match best {
            None => true,
            Some(b) => {
                candidate.view > b.view + 1e-6
                    || ((candidate.view - b.view).abs() <= 1e-6 && candidate.angle < b.angle)
            }
        };
        if better {
            best = Some(candidate);
        }
    }
    best
}

fn direct(state: &TableState, cue: Point, target: usize, route: &Route, params: CueParams) -> Option<Candidate> {
    let at = state.ball(target)?.at;
    Some(Candidate {
        kind: Kind::Direct,
        target,
        pocket: Some(route.pocket),
        entry: Some(route.entry),
        params,
        angle: Some(route.angle),
        to_target: cue.distance(&at),
        to_pocket: route.distance,
        anchor: None,
        cue,
    })
}

/// Cushion contacts of a cue path off `rails`, in the order they are
/// struck, ending on `target`. `None` if any leg leaves the cloth or is
/// obstructed.
fn fold(state: &TableState, cue: Point, target: usize, rails: &[Rail]) -> Option<Vec<Point>> {
    let table = state.table();
    let ball = state.ball(target)?.at;
    let mut images = vec![ball];
    for rail in rails {
        let last = *images.last()?;
        images.push(table.mirror(last, *rail));
    }
    let mut from = cue;
    let mut contacts = Vec::with_capacity(rails.len());
    for (k, rail) in rails.iter().enumerate().rev() {
        let image = images[k + 1];
        let hit = table.cushion(from, image, *rail)?;
        if !ahead(&from, &hit, &image)
            || !on_cushion(table, &hit, *rail)
            || !clear(state, &from, &hit, &[target])
        {
            return None;
        }
        contacts.push(hit);
        from = hit;
    }
    clear(state, &from, &ball, &[target]).then_some(contacts)
}

/// Own balls the cue can see: an unobstructed line, no pocket hanging
/// over that line, and room around the ball.
pub fn visible(state: &TableState, colour: Colour, cue: Point) -> Vec<usize> {
    state
        .own(colour)
        .filter(|(i, p)| clear(state, &cue, &p.at, &[*i]))
        .filter(|(_, p)| !pocket_between(state.table(), &cue, &p.at))
        .filter(|(i, _)| !crowded(state, *i))
        .map(|(i, _)| i)
        .collect()
}

/// Every visible own ball into its best pocket, once per cue variation.
pub fn pots(state: &TableState, colour: Colour, cue: Point) -> Vec<Candidate> {
    visible(state, colour, cue)
        .into_iter()
        .filter_map(|i| route(state, &cue, i).map(|r| (i, r)))
        .flat_map(|(i, r)| {
            CueParams::variations()
                .into_iter()
                .filter_map(move |params| direct(state, cue, i, &r, params))
        })
        .collect()
}

/// Visible own balls played off a cushion: each pocket mirrored across
/// each rail stands in as a virtual pocket.
pub fn banks(state: &TableState, colour: Colour, cue: Point) -> Vec<Candidate> {
    let table = state.table();
    let r = state.radius();
    let mut shots = Vec::new();
    for i in visible(state, colour, cue) {
        let at = state.balls()[i].at;
        for (pocket, mouth) in table.pockets().iter().enumerate() {
            let entry = table.entry(*mouth);
            for rail in Rail::all() {
                let virtual_pocket = table.mirror(*mouth, rail);
                if virtual_pocket.distance(mouth) < 2.0 * r {
                    continue;
                }
                let Some(contact) = table.cushion(at, virtual_pocket, rail) else {
                    continue;
                };
                if !ahead(&at, &contact, &virtual_pocket)
                    || !on_cushion(table, &contact, rail)
                    || !clear(state, &at, &contact, &[i])
                    || !clear(state, &contact, &entry, &[i])
                {
                    continue;
                }
                let angle = cut(&cue, &at, &virtual_pocket);
                shots.extend(CueParams::variations().into_iter().map(|params| Candidate {
                    kind: Kind::Bank,
                    target: i,
                    pocket: Some(pocket),
                    entry: Some(entry),
                    params,
                    angle: Some(angle),
                    to_target: cue.distance(&at),
                    to_pocket: at.distance(&entry),
                    anchor: Some(contact),
                    cue,
                }));
            }
        }
    }
    shots
}

/// With a free ball, any coloured ball may be nominated. The cue ball is
/// placed on the far side of the ball from its nearest pocket, pulled
/// back inside the cloth and behind baulk when required.
pub fn free_balls(state: &TableState) -> Vec<Candidate> {
    if !state.free_ball() {
        return Vec::new();
    }
    let table = state.table();
    let r = state.radius();
    let mut shots = Vec::new();
    for (i, p) in state.balls().iter().enumerate() {
        if !p.ball.is_object() || p.ball.is_black() {
            continue;
        }
        let Some((pocket, mouth)) = table.nearest_pocket(&p.at) else {
            continue;
        };
        let entry = table.entry(mouth);
        let mut spot = table.clamp(p.at + (p.at - entry));
        if let Some(baulk) = state.placement() {
            spot = baulk.clip(spot);
        }
        let overlaps = state
            .balls()
            .iter()
            .any(|other| !other.ball.is_cue() && other.at.distance(&spot) < 2.0 * r);
        if !table.contains(&spot)
            || overlaps
            || !clear(state, &spot, &p.at, &[i])
            || !clear(state, &p.at, &entry, &[i])
        {
            continue;
        }
        let angle = cut(&spot, &p.at, &entry);
        shots.extend(CueParams::variations().into_iter().map(|params| Candidate {
            kind: Kind::FreeBall,
            target: i,
            pocket: Some(pocket),
            entry: Some(entry),
            params,
            angle: Some(angle),
            to_target: spot.distance(&p.at),
            to_pocket: p.at.distance(&entry),
            anchor: None,
            cue: spot,
        }));
    }
    shots
}

/// Escapes onto own balls the cue cannot see directly, searching
/// cushion sequences breadth first up to `rails` deep.
pub fn kicks(state: &TableState, colour: Colour, cue: Point, rails: usize) -> Vec<Candidate> {
    let table = state.table();
    let mut shots = Vec::new();
    for (i, p) in state.own(colour) {
        if clear(state, &cue, &p.at, &[i]) {
            continue;
        }
        let mut queue = VecDeque::from([(p.at, Vec::<Rail>::new())]);
        let mut seen = HashSet::new();
        while let Some((image, path)) = queue.pop_front() {
            if path.len() >= rails {
                continue;
            }
            for rail in Rail::all() {
                let mirrored = table.mirror(image, rail);
                let mut next = path.clone();
                next.push(rail);
                if !seen.insert((mirrored.x.to_bits(), mirrored.y.to_bits(), next.len())) {
                    continue;
                }
                match fold(state, cue, i, &next) {
                    Some(contacts) => shots.push(Candidate {
                        kind: Kind::Kick,
                        target: i,
                        pocket: None,
                        entry: None,
                        params: CueParams::new(Speed::Medium, Spin::Stun),
                        angle: None,
                        to_target: cue.distance(&p.at),
                        to_pocket: 0.0,
                        anchor: contacts.first().copied(),
                        cue,
                    }),
                    None => queue.push_back((mirrored, next)),
                }
            }
        }
    }
    shots
}

/// Soft contact on the shooter's own ball nearest the cue. The target is
/// always a legal first contact, never an opponent ball.
pub fn gentle(state: &TableState, colour: Colour, cue: Point) -> Option<Candidate> {
    state
        .own(colour)
        .min_by(|(_, a), (_, b)| a.at.distance(&cue).total_cmp(&b.at.distance(&cue)))
        .map(|(i, p)| Candidate {
            kind: Kind::Gentle,
            target: i,
            pocket: None,
            entry: None,
            params: CueParams::new(Speed::Soft, Spin::Stun),
            angle: Some(std::f32::consts::FRAC_PI_4),
            to_target: cue.distance(&p.at),
            to_pocket: 0.0,
            anchor: None,
            cue,
        })
}

/// The nearest visible own ball into its best pocket, medium stun. Used
/// to value the position a shot leaves.
pub fn fast(state: &TableState, colour: Colour, cue: Point) -> Option<Candidate> {
    let nearest = visible(state, colour, cue)
        .into_iter()
        .min_by(|a, b| {
            let da = state.balls()[*a].at.distance(&cue);
            let db = state.balls()[*b].at.distance(&cue);
            da.total_cmp(&db)
        })?;
    let route = route(state, &cue, nearest)?;
    direct(state, cue, nearest, &route, CueParams::new(Speed::Medium, Spin::Stun))
}
