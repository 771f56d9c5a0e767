use std::fmt;

use serde::Serialize;

use super::decompose::{Decomposition, Shape};
use crate::model::*;

#[derive(Debug)]
pub struct YakuContext<'a> {
    hand: &'a TileTable,         // 門前の手牌 国士, 九蓮宝燈の判定などに使用
    decomp: &'a Decomposition,   // 副露を含むすべての面子と上がり牌の位置
    ctx: &'a Context,            // 和了時の状況
    pair_tile: Option<Tile>,     // 雀頭の牌 (七対子, 国士無双はNone)
    is_open: bool,               // 鳴きの有無
    counts: Counts,              // 面子や牌種別のカウント
    iipeikou_count: usize,       // 一盃口, 二盃口用
    yakuhai_check: TileRow,      // 字牌の刻子のカウント(雀頭は含まない)
}

impl<'a> YakuContext<'a> {
    pub fn new(hand: &'a TileTable, decomp: &'a Decomposition, ctx: &'a Context) -> Self {
        let pair_tile = if decomp.shape == Shape::Normal {
            decomp.pair().map(|m| m.tile)
        } else {
            None
        };
        let is_open = decomp.melds.iter().any(|m| m.open);
        let mut yc = Self {
            hand,
            decomp,
            ctx,
            pair_tile,
            is_open,
            counts: Counts::default(),
            iipeikou_count: 0,
            yakuhai_check: TileRow::default(),
        };
        yc.counts = count_type(&yc);
        yc.iipeikou_count = count_iipeikou(&decomp.melds);
        yc.yakuhai_check = check_yakuhai(&decomp.melds);
        yc
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    #[inline]
    pub fn context(&self) -> &Context {
        self.ctx
    }

    #[inline]
    pub fn decomposition(&self) -> &Decomposition {
        self.decomp
    }

    // 符計算, 暗刻の判定で明刻として扱う面子
    // ロン和了で上がり牌により完成した刻子は明刻とみなす
    pub fn is_open_meld(&self, index: Index) -> bool {
        let m = &self.decomp.melds[index];
        m.open
            || (!self.ctx.is_drawn
                && m.kind == MeldKind::Triplet
                && self.decomp.win_index == Some(index))
    }

    // 役牌の雀頭 (連風牌も1つとして扱う)
    pub fn is_yakuhai_pair(&self) -> bool {
        match self.pair_tile {
            Some(t) => {
                let is_wind = t.1 == self.ctx.seat_wind || t.1 == self.ctx.prevalent_wind;
                t.is_doragon() || (t.is_wind() && is_wind)
            }
            None => false,
        }
    }

    // (役一覧, 役満かどうか, 翻数または役満倍数)を返却
    pub fn calc_yaku(&self) -> (Vec<YakuMatch>, bool, usize) {
        let mut yaku = vec![];
        for &y in YAKU_LIST {
            if let Some(fan) = y.eval(self) {
                yaku.push(YakuMatch::new(y, fan));
            }
        }

        let yakuman: Vec<YakuMatch> =
            yaku.iter().filter(|y| y.yaku.is_yakuman()).cloned().collect();
        if !yakuman.is_empty() {
            let m = yakuman.iter().map(|y| y.fan - 12).sum();
            // 役満が含まれている場合、役満以上の役のみを返却
            (yakuman, true, m)
        } else {
            let m = yaku.iter().map(|y| y.fan).sum();
            (yaku, false, m) // 役満を含んでいない場合
        }
    }
}

#[derive(Debug, Default)]
struct Counts {
    shuntsu: usize,       // 門前の順子
    shuntsu_total: usize, // 順子 + チー
    koutsu_total: usize,  // 刻子 + ポン + 槓子
    ankou_total: usize,   // 暗刻 + 暗槓 (ロンで完成した刻子は除く)
    kantsu_total: usize,  // 明槓 + 暗槓
    tis: [usize; TYPE],   // tile Type Indices counts
}

fn count_type(yc: &YakuContext<'_>) -> Counts {
    let mut cnt = Counts::default();
    for (i, m) in yc.decomp.melds.iter().enumerate() {
        match m.kind {
            MeldKind::Pair => {}
            MeldKind::Sequence => {
                cnt.shuntsu_total += 1;
                if !m.open {
                    cnt.shuntsu += 1;
                }
            }
            MeldKind::Triplet | MeldKind::Quad => {
                cnt.koutsu_total += 1;
                if !yc.is_open_meld(i) {
                    cnt.ankou_total += 1;
                }
                if m.kind == MeldKind::Quad {
                    cnt.kantsu_total += 1;
                }
            }
        }

        cnt.tis[m.tile.0] += 1;
    }

    cnt
}

fn count_iipeikou(melds: &[Meld]) -> usize {
    let mut n = 0;
    let mut shuntsu = TileTable::default();
    for m in melds {
        if m.kind == MeldKind::Sequence && !m.open {
            let t = m.tile;
            shuntsu[t.0][t.1] += 1;
            if shuntsu[t.0][t.1] % 2 == 0 {
                n += 1;
            }
        }
    }

    n
}

fn check_yakuhai(melds: &[Meld]) -> TileRow {
    let mut tr = TileRow::default();
    for m in melds {
        if m.is_triplet() && m.tile.is_hornor() {
            tr[m.tile.1] += 1;
        }
    }

    tr
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Yaku {
    Riichi,
    DoubleRiichi,
    Ippatsu,
    MenzenTsumo,
    Tanyao,
    Pinfu,
    Iipeikou,
    Yakuhai,
    Haitei,
    Houtei,
    Rinshan,
    Chankan,
    Ittsu,
    SanshokuDoujun,
    SanshokuDoukou,
    Chanta,
    Junchan,
    Toitoi,
    Sanankou,
    Sankantsu,
    Honroutou,
    Shousangen,
    Chiitoitsu,
    Ryanpeikou,
    Honitsu,
    Chinitsu,
    // 役満
    Kokushimusou,
    Suuankou,
    Daisangen,
    Shousuushii,
    Daisuushii,
    Tsuuiisou,
    Ryuuiisou,
    Chinroutou,
    Suukantsu,
    Chuurenpoutou,
}

use Yaku::*;

// 判定順 (出力もこの順)
static YAKU_LIST: &[Yaku] = &[
    Riichi,
    DoubleRiichi,
    Ippatsu,
    MenzenTsumo,
    Tanyao,
    Pinfu,
    Iipeikou,
    Yakuhai,
    Haitei,
    Houtei,
    Rinshan,
    Chankan,
    Ittsu,
    SanshokuDoujun,
    SanshokuDoukou,
    Chanta,
    Junchan,
    Toitoi,
    Sanankou,
    Sankantsu,
    Honroutou,
    Shousangen,
    Chiitoitsu,
    Ryanpeikou,
    Honitsu,
    Chinitsu,
    Kokushimusou,
    Suuankou,
    Daisangen,
    Shousuushii,
    Daisuushii,
    Tsuuiisou,
    Ryuuiisou,
    Chinroutou,
    Suukantsu,
    Chuurenpoutou,
];

impl Yaku {
    // (名前, 鳴きなしの翻, 鳴きありの翻(食い下がり))
    // 鳴きありが0の場合は門前限定
    // 役満は13以上 (13: 役満, 14: 二倍役満)
    fn define(self) -> (&'static str, usize, usize) {
        match self {
            Riichi => ("Riichi", 1, 0),
            DoubleRiichi => ("Double Riichi", 2, 0),
            Ippatsu => ("Ippatsu", 1, 0),
            MenzenTsumo => ("Menzen Tsumo", 1, 0),
            Tanyao => ("Tanyao", 1, 1),
            Pinfu => ("Pinfu", 1, 0),
            Iipeikou => ("Iipeikou", 1, 0),
            Yakuhai => ("Yakuhai", 1, 1),
            Haitei => ("Haitei Raoyue", 1, 1),
            Houtei => ("Houtei Raoyui", 1, 1),
            Rinshan => ("Rinshan Kaihou", 1, 1),
            Chankan => ("Chankan", 1, 1),
            Ittsu => ("Ittsu", 2, 1),
            SanshokuDoujun => ("Sanshoku Doujun", 2, 1),
            SanshokuDoukou => ("Sanshoku Doukou", 2, 2),
            Chanta => ("Chanta", 2, 1),
            Junchan => ("Junchan", 3, 2),
            Toitoi => ("Toitoi", 2, 2),
            Sanankou => ("Sanankou", 2, 2),
            Sankantsu => ("Sankantsu", 2, 2),
            Honroutou => ("Honroutou", 2, 2),
            Shousangen => ("Shousangen", 2, 2),
            Chiitoitsu => ("Chiitoitsu", 2, 0),
            Ryanpeikou => ("Ryanpeikou", 3, 0),
            Honitsu => ("Honitsu", 3, 2),
            Chinitsu => ("Chinitsu", 6, 5),
            Kokushimusou => ("Kokushi Musou", 13, 0),
            Suuankou => ("Suuankou", 13, 0),
            Daisangen => ("Daisangen", 13, 13),
            Shousuushii => ("Shousuushii", 13, 13),
            Daisuushii => ("Daisuushii", 14, 14),
            Tsuuiisou => ("Tsuuiisou", 13, 13),
            Ryuuiisou => ("Ryuuiisou", 13, 13),
            Chinroutou => ("Chinroutou", 13, 13),
            Suukantsu => ("Suukantsu", 13, 13),
            Chuurenpoutou => ("Chuuren Poutou", 13, 0),
        }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.define().0
    }

    #[inline]
    pub fn is_yakuman(self) -> bool {
        self.define().1 >= 13
    }

    // 成立した場合は翻数を返却
    pub fn eval(self, ctx: &YakuContext<'_>) -> Option<usize> {
        let n = match self {
            Yakuhai => count_yakuhai(ctx),
            _ => self.matches(ctx) as usize,
        };
        if n == 0 {
            return None;
        }

        let (_, fan_close, fan_open) = self.define();
        let fan = if ctx.is_open { fan_open } else { fan_close };
        if fan == 0 {
            return None; // 門前限定
        }
        Some(fan * n)
    }

    fn matches(self, ctx: &YakuContext<'_>) -> bool {
        match self {
            Riichi => is_riichi(ctx),
            DoubleRiichi => is_dabururiichi(ctx),
            Ippatsu => is_ippatsu(ctx),
            MenzenTsumo => is_menzentsumo(ctx),
            Tanyao => is_tanyaochuu(ctx),
            Pinfu => is_pinfu(ctx),
            Iipeikou => is_iipeikou(ctx),
            Yakuhai => count_yakuhai(ctx) != 0,
            Haitei => is_haiteiraoyue(ctx),
            Houtei => is_houteiraoyui(ctx),
            Rinshan => is_rinshankaihou(ctx),
            Chankan => is_chankan(ctx),
            Ittsu => is_ikkitsuukan(ctx),
            SanshokuDoujun => is_sanshokudoujun(ctx),
            SanshokuDoukou => is_sanshokudoukou(ctx),
            Chanta => is_chanta(ctx),
            Junchan => is_junchan(ctx),
            Toitoi => is_toitoihou(ctx),
            Sanankou => is_sanankou(ctx),
            Sankantsu => is_sankantsu(ctx),
            Honroutou => is_honroutou(ctx),
            Shousangen => is_shousangen(ctx),
            Chiitoitsu => is_chiitoitsu(ctx),
            Ryanpeikou => is_ryanpeikou(ctx),
            Honitsu => is_honiisou(ctx),
            Chinitsu => is_chiniisou(ctx),
            Kokushimusou => is_kokushimusou(ctx),
            Suuankou => is_suuankou(ctx),
            Daisangen => is_daisangen(ctx),
            Shousuushii => is_shousuushii(ctx),
            Daisuushii => is_daisuushii(ctx),
            Tsuuiisou => is_tuuiisou(ctx),
            Ryuuiisou => is_ryuuiisou(ctx),
            Chinroutou => is_chinroutou(ctx),
            Suukantsu => is_suukantsu(ctx),
            Chuurenpoutou => is_chuurenpoutou(ctx),
        }
    }
}

impl fmt::Display for Yaku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// 成立した役と翻数 (役満の場合は13以上)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YakuMatch {
    pub yaku: Yaku,
    pub name: &'static str,
    pub fan: usize,
}

impl YakuMatch {
    pub fn new(yaku: Yaku, fan: usize) -> Self {
        Self {
            yaku,
            name: yaku.name(),
            fan,
        }
    }
}

// 役の優先順位 =================================================================
// * 役満が存在する場合は役満以外の役は削除
// * 以下の役は排他的(包含関係)であり右側を優先
//     一盃口, 二盃口
//     チャンタ, 純チャンタ
//     混老頭, 清老頭
//     混一色, 清一色
//     三暗刻, 四暗刻
//     三槓子, 四槓子
//     小三元, 大三元
//     小四喜, 大四喜

// 役牌 (場風, 自風, 三元牌の刻子の数 連風牌は2つとして数える)
fn count_yakuhai(ctx: &YakuContext<'_>) -> usize {
    let yc = &ctx.yakuhai_check;
    yc[ctx.ctx.prevalent_wind] + yc[ctx.ctx.seat_wind] + yc[DW] + yc[DG] + yc[DR]
}

// 断么九
fn is_tanyaochuu(ctx: &YakuContext<'_>) -> bool {
    if ctx.decomp.melds.is_empty() {
        return false; // 国士対策
    }

    ctx.decomp.melds.iter().all(|m| !m.has_end())
}

// 平和
fn is_pinfu(ctx: &YakuContext<'_>) -> bool {
    if ctx.is_open || ctx.counts.shuntsu != 4 {
        return false;
    }
    if ctx.is_yakuhai_pair() {
        return false;
    }

    // 上がり牌の両面待ち判定
    ctx.decomp.wait == Wait::Ryanmen
}

// 一盃口
fn is_iipeikou(ctx: &YakuContext<'_>) -> bool {
    !ctx.is_open && ctx.iipeikou_count == 1
}

// 二盃口
fn is_ryanpeikou(ctx: &YakuContext<'_>) -> bool {
    !ctx.is_open && ctx.iipeikou_count == 2
}

// 一気通貫
fn is_ikkitsuukan(ctx: &YakuContext<'_>) -> bool {
    if ctx.counts.shuntsu_total < 3 {
        return false;
    }

    let mut f147 = [[false; 3]; 3];
    for m in &ctx.decomp.melds {
        if m.is_sequence() {
            match m.tile.1 {
                1 | 4 | 7 => f147[m.tile.0][m.tile.1 / 3] = true,
                _ => {}
            }
        }
    }

    f147.iter().any(|f| f[0] && f[1] && f[2])
}

// 三色同順
fn is_sanshokudoujun(ctx: &YakuContext<'_>) -> bool {
    if ctx.counts.shuntsu_total < 3 {
        return false;
    }

    let mut mps = [[false; 3]; TNUM];
    for m in &ctx.decomp.melds {
        if m.is_sequence() {
            mps[m.tile.1][m.tile.0] = true;
        }
    }

    mps.iter().any(|f| f[0] && f[1] && f[2])
}

// 三色同刻
fn is_sanshokudoukou(ctx: &YakuContext<'_>) -> bool {
    if ctx.counts.koutsu_total < 3 {
        return false;
    }

    let mut mps = [[false; 3]; TNUM];
    for m in &ctx.decomp.melds {
        if m.is_triplet() && m.tile.is_suit() {
            mps[m.tile.1][m.tile.0] = true;
        }
    }

    mps.iter().any(|f| f[0] && f[1] && f[2])
}

// チャンタ
fn is_chanta(ctx: &YakuContext<'_>) -> bool {
    if ctx.counts.shuntsu_total == 0 {
        return false;
    }

    let melds = &ctx.decomp.melds;
    melds.iter().all(|m| m.has_end()) && melds.iter().any(|m| m.tile.is_hornor())
}

// 純チャン
fn is_junchan(ctx: &YakuContext<'_>) -> bool {
    if ctx.counts.shuntsu_total == 0 {
        return false;
    }

    let melds = &ctx.decomp.melds;
    melds.iter().all(|m| m.has_end()) && !melds.iter().any(|m| m.tile.is_hornor())
}

// 混老頭
fn is_honroutou(ctx: &YakuContext<'_>) -> bool {
    if ctx.counts.shuntsu_total != 0 {
        return false;
    }

    let mut has_hornor = false;
    let mut has_terminal = false;
    for m in &ctx.decomp.melds {
        let t = m.tile;
        if t.is_hornor() {
            has_hornor = true;
        } else if t.is_terminal() {
            has_terminal = true;
        } else {
            return false;
        }
    }

    has_hornor && has_terminal
}

// 清老頭
fn is_chinroutou(ctx: &YakuContext<'_>) -> bool {
    if ctx.counts.shuntsu_total != 0 || ctx.decomp.melds.is_empty() {
        return false;
    }

    ctx.decomp.melds.iter().all(|m| m.tile.is_terminal())
}

// 対々和
fn is_toitoihou(ctx: &YakuContext<'_>) -> bool {
    ctx.counts.koutsu_total == 4
}

// 三暗刻
fn is_sanankou(ctx: &YakuContext<'_>) -> bool {
    ctx.counts.ankou_total == 3
}

// 四暗刻 (ロンのシャンポン待ちは明刻を含むため三暗刻)
fn is_suuankou(ctx: &YakuContext<'_>) -> bool {
    ctx.counts.ankou_total == 4
}

// 三槓子
fn is_sankantsu(ctx: &YakuContext<'_>) -> bool {
    ctx.counts.kantsu_total == 3
}

// 四槓子
fn is_suukantsu(ctx: &YakuContext<'_>) -> bool {
    ctx.counts.kantsu_total == 4
}

fn count_suit_types(ctx: &YakuContext<'_>) -> usize {
    let tis = &ctx.counts.tis;
    (0..TZ).filter(|&ti| tis[ti] > 0).count()
}

// 混一色
fn is_honiisou(ctx: &YakuContext<'_>) -> bool {
    count_suit_types(ctx) == 1 && ctx.counts.tis[TZ] > 0
}

// 清一色
fn is_chiniisou(ctx: &YakuContext<'_>) -> bool {
    count_suit_types(ctx) == 1 && ctx.counts.tis[TZ] == 0
}

// 小三元
fn is_shousangen(ctx: &YakuContext<'_>) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[DW] + yc[DG] + yc[DR] == 2 && ctx.pair_tile.map_or(false, |t| t.is_doragon())
}

// 大三元
fn is_daisangen(ctx: &YakuContext<'_>) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[DW] + yc[DG] + yc[DR] == 3
}

// 小四喜
fn is_shousuushii(ctx: &YakuContext<'_>) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[WE] + yc[WS] + yc[WW] + yc[WN] == 3 && ctx.pair_tile.map_or(false, |t| t.is_wind())
}

// 大四喜
fn is_daisuushii(ctx: &YakuContext<'_>) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[WE] + yc[WS] + yc[WW] + yc[WN] == 4
}

// 緑一色
fn is_ryuuiisou(ctx: &YakuContext<'_>) -> bool {
    if ctx.decomp.melds.is_empty() {
        return false;
    }

    ctx.decomp.melds.iter().all(|m| {
        let t = m.tile;
        match m.kind {
            MeldKind::Sequence => t.0 == TS && t.1 == 2, // 順子は234以外は不可
            _ => (t.0 == TS && matches!(t.1, 2 | 3 | 4 | 6 | 8)) || t == Tile(TZ, DG),
        }
    })
}

// 字一色
fn is_tuuiisou(ctx: &YakuContext<'_>) -> bool {
    let n = ctx.decomp.melds.len();
    n != 0 && ctx.counts.tis[TZ] == n
}

// 九蓮宝燈
fn is_chuurenpoutou(ctx: &YakuContext<'_>) -> bool {
    if ctx.is_open || ctx.decomp.shape != Shape::Normal {
        return false;
    }

    let tis = &ctx.counts.tis;
    let ti = match (0..TZ).find(|&ti| tis[ti] == 5) {
        Some(ti) => ti,
        None => return false,
    };

    let h = &ctx.hand;
    if h[ti][1] < 3 || h[ti][9] < 3 {
        return false;
    }
    (2..9).all(|ni| h[ti][ni] != 0)
}

// 国士無双
fn is_kokushimusou(ctx: &YakuContext<'_>) -> bool {
    ctx.decomp.shape == Shape::Kokushimusou
}

// 七対子
fn is_chiitoitsu(ctx: &YakuContext<'_>) -> bool {
    ctx.decomp.shape == Shape::Chiitoitsu
}

// 門前自摸
fn is_menzentsumo(ctx: &YakuContext<'_>) -> bool {
    ctx.ctx.is_drawn && !ctx.is_open
}

// リーチ
fn is_riichi(ctx: &YakuContext<'_>) -> bool {
    ctx.ctx.riichi && !ctx.ctx.flags.dabururiichi
}

// ダブルリーチ
fn is_dabururiichi(ctx: &YakuContext<'_>) -> bool {
    ctx.ctx.flags.dabururiichi
}

// 一発
fn is_ippatsu(ctx: &YakuContext<'_>) -> bool {
    ctx.ctx.flags.ippatsu
}

// 海底撈月
fn is_haiteiraoyue(ctx: &YakuContext<'_>) -> bool {
    ctx.ctx.flags.haiteiraoyue
}

// 河底撈魚
fn is_houteiraoyui(ctx: &YakuContext<'_>) -> bool {
    ctx.ctx.flags.houteiraoyui
}

// 嶺上開花
fn is_rinshankaihou(ctx: &YakuContext<'_>) -> bool {
    ctx.ctx.flags.rinshankaihou
}

// 槍槓
fn is_chankan(ctx: &YakuContext<'_>) -> bool {
    ctx.ctx.flags.chankan
}

#[cfg(test)]
pub(crate) fn calc_yaku_for(
    groups: &[&str],
    wt: &str,
    ctx: &Context,
) -> Vec<(Vec<YakuMatch>, bool, usize)> {
    use super::decompose::decompose_hand;

    let hand = Hand::from_groups(groups, wt).unwrap();
    decompose_hand(&hand)
        .iter()
        .map(|d| YakuContext::new(&hand.table, d, ctx).calc_yaku())
        .collect()
}

#[cfg(test)]
fn yaku_names(res: &(Vec<YakuMatch>, bool, usize)) -> Vec<Yaku> {
    res.0.iter().map(|y| y.yaku).collect()
}

#[test]
fn test_yaku_iipeikou_honitsu_yakuhai() {
    let ctx = Context::default();
    let res = calc_yaku_for(&["rrrd", "EEEw", "234p", "234p", "11p"], "1p", &ctx);
    assert_eq!(res.len(), 2);
    for r in &res {
        assert_eq!(yaku_names(r), vec![Iipeikou, Yakuhai, Honitsu]);
        assert_eq!(r.0[1].fan, 3); // 中 + ダブ東
        assert_eq!(r.2, 7);
        assert!(!r.1);
    }
}

#[test]
fn test_yaku_ryanpeikou_excludes_iipeikou() {
    let ctx = Context::default();
    let res = calc_yaku_for(&["223344m", "667788p", "55s"], "5s", &ctx);
    let normal: Vec<_> = res.iter().filter(|r| r.0.iter().any(|y| y.yaku == Ryanpeikou)).collect();
    assert!(!normal.is_empty());
    for r in normal {
        assert!(!yaku_names(r).contains(&Iipeikou));
    }
    // 七対子としての解釈も存在する
    assert!(res.iter().any(|r| yaku_names(r).contains(&Chiitoitsu)));
}

#[test]
fn test_yaku_tanyao_toitoi_sanankou() {
    let ctx = Context {
        is_drawn: true,
        ..Default::default()
    };
    let res = calc_yaku_for(&["222m", "444p", "666s", "345so", "88p"], "8p", &ctx);
    assert_eq!(res.len(), 1);
    assert_eq!(yaku_names(&res[0]), vec![Tanyao, Sanankou]);

    // ロンで完成した刻子は暗刻として数えない
    let ctx = Context::default();
    let res = calc_yaku_for(&["222m", "444p", "666s", "888so", "88p"], "6s", &ctx);
    assert_eq!(res.len(), 1);
    assert_eq!(yaku_names(&res[0]), vec![Tanyao, Toitoi]);
}

#[test]
fn test_yaku_suuankou() {
    let ctx = Context {
        is_drawn: true,
        ..Default::default()
    };
    let res = calc_yaku_for(&["222m", "444p", "666s", "999s", "Ew"], "Ew", &ctx);
    assert_eq!(res.len(), 1);
    assert!(res[0].1);
    assert_eq!(yaku_names(&res[0]), vec![Suuankou]);
    assert_eq!(res[0].2, 1);

    // ロンのシャンポン待ちは四暗刻にならない
    let ctx = Context::default();
    let res = calc_yaku_for(&["222m", "444p", "666s", "999s", "EEw"], "9s", &ctx);
    assert_eq!(res.len(), 1);
    assert!(!res[0].1);
    assert_eq!(yaku_names(&res[0]), vec![Toitoi, Sanankou]);
}

#[test]
fn test_yaku_sanshoku_chinitsu_pinfu() {
    let ctx = Context::default();
    let res = calc_yaku_for(&["123m", "123p", "123s", "789s", "55m"], "1p", &ctx);
    assert_eq!(res.len(), 1);
    assert_eq!(yaku_names(&res[0]), vec![Pinfu, SanshokuDoujun]);

    let res = calc_yaku_for(&["123s", "456s", "789s", "789s", "55s"], "4s", &ctx);
    assert_eq!(res.len(), 1);
    assert_eq!(yaku_names(&res[0]), vec![Pinfu, Iipeikou, Ittsu, Chinitsu]);
    assert_eq!(res[0].2, 10);

    // 鳴きありは食い下がり
    let res = calc_yaku_for(&["123so", "456s", "789s", "789s", "55s"], "4s", &ctx);
    assert_eq!(yaku_names(&res[0]), vec![Ittsu, Chinitsu]);
    assert_eq!(res[0].2, 6);
}

#[test]
fn test_yaku_chanta_junchan() {
    let ctx = Context::default();
    let res = calc_yaku_for(&["123m", "789p", "999s", "NNNw", "11p"], "1p", &ctx);
    assert_eq!(yaku_names(&res[0]), vec![Chanta]);

    let res = calc_yaku_for(&["123m", "789p", "999s", "111s", "11p"], "1p", &ctx);
    assert_eq!(yaku_names(&res[0]), vec![Junchan]);
}

#[test]
fn test_yaku_riichi_flags() {
    let mut ctx = Context {
        riichi: true,
        is_drawn: true,
        ..Default::default()
    };
    ctx.flags.ippatsu = true;
    ctx.flags.haiteiraoyue = true;
    let res = calc_yaku_for(&["123m", "456m", "789p", "345s", "99s"], "3s", &ctx);
    assert_eq!(yaku_names(&res[0]), vec![Riichi, Ippatsu, MenzenTsumo, Pinfu, Haitei]);
    assert_eq!(res[0].2, 5);

    let ctx = Context::default();
    let res = calc_yaku_for(&["123m", "456m", "789p", "345s", "99s"], "3s", &ctx);
    assert_eq!(yaku_names(&res[0]), vec![Pinfu]);

    // カンチャン待ちは平和にならない
    let res = calc_yaku_for(&["123m", "456m", "789p", "345s", "99s"], "4s", &ctx);
    assert!(res[0].0.is_empty());
}

#[test]
fn test_yaku_yakuman() {
    let ctx = Context::default();
    let res = calc_yaku_for(&["19m", "19p", "19s", "ESWNw", "wgrd", "9s"], "9s", &ctx);
    assert_eq!(yaku_names(&res[0]), vec![Kokushimusou]);
    assert!(res[0].1);

    let res = calc_yaku_for(&["wwwd", "gggd", "rrrd", "234s", "EEw"], "4s", &ctx);
    assert_eq!(yaku_names(&res[0]), vec![Daisangen]);

    let res = calc_yaku_for(&["EEEwo", "SSSw", "WWWw", "NNNw", "11m"], "1m", &ctx);
    assert_eq!(yaku_names(&res[0]), vec![Daisuushii]);
    assert_eq!(res[0].2, 2);

    let res = calc_yaku_for(&["1112345678999p", "5p"], "5p", &ctx);
    assert!(!res.is_empty());
    for r in &res {
        assert_eq!(yaku_names(r), vec![Chuurenpoutou]);
    }

    let res = calc_yaku_for(&["222s", "333s", "444s", "666s", "ggd"], "6s", &ctx);
    assert!(res.iter().any(|r| yaku_names(r).contains(&Ryuuiisou)));
}

#[test]
fn test_yaku_none() {
    let ctx = Context::default();
    let res = calc_yaku_for(&["123mo", "456m", "789p", "345s", "99s"], "3s", &ctx);
    assert_eq!(res.len(), 1);
    assert!(res[0].0.is_empty());
    assert_eq!(res[0].2, 0);
}

#[cfg(test)]
fn eval_yaku_for(groups: &[&str], wt: &str, ctx: &Context, yaku: Yaku) -> Vec<Option<usize>> {
    use super::decompose::decompose_hand;

    let hand = Hand::from_groups(groups, wt).unwrap();
    decompose_hand(&hand)
        .iter()
        .map(|d| yaku.eval(&YakuContext::new(&hand.table, d, ctx)))
        .collect()
}

#[test]
fn test_yaku_sanshoku_doukou() {
    let ctx = Context::default();
    let res = calc_yaku_for(&["222m", "222p", "222s", "345m", "55s"], "5s", &ctx);
    assert_eq!(res.len(), 1);
    assert_eq!(yaku_names(&res[0]), vec![Tanyao, SanshokuDoukou, Sanankou]);
    assert_eq!(res[0].2, 5);
}

#[test]
fn test_yaku_shousangen() {
    let ctx = Context::default();
    let res = calc_yaku_for(&["wwwd", "gggd", "234s", "rrd", "678m"], "8m", &ctx);
    assert_eq!(res.len(), 1);
    assert_eq!(yaku_names(&res[0]), vec![Yakuhai, Shousangen]);
    assert_eq!(res[0].0[0].fan, 2);
    assert_eq!(res[0].2, 4);

    // 大三元は小三元を含まない
    let res = eval_yaku_for(&["wwwd", "gggd", "rrrd", "234s", "EEw"], "4s", &ctx, Shousangen);
    assert!(res.iter().all(|r| r.is_none()));
}

#[test]
fn test_yaku_honroutou_chinroutou() {
    let ctx = Context::default();
    let res = calc_yaku_for(&["111mo", "999p", "WWWw", "NNNw", "99s"], "9s", &ctx);
    assert_eq!(res.len(), 1);
    assert_eq!(yaku_names(&res[0]), vec![Toitoi, Sanankou, Honroutou]);
    assert_eq!(res[0].2, 6);

    let res = calc_yaku_for(&["111m", "999m", "111p", "999po", "99s"], "9s", &ctx);
    assert_eq!(res.len(), 1);
    assert!(res[0].1);
    assert_eq!(yaku_names(&res[0]), vec![Chinroutou]);
    assert_eq!(res[0].2, 1);

    // 字牌がなければ混老頭ではない
    let res = eval_yaku_for(&["111m", "999m", "111p", "999po", "99s"], "9s", &ctx, Honroutou);
    assert_eq!(res, vec![None]);
}

#[test]
fn test_yaku_sankantsu_suukantsu() {
    let ctx = Context::default();
    let res = calc_yaku_for(&["1111m", "2222po", "3333s", "456p", "77s"], "7s", &ctx);
    assert_eq!(res.len(), 1);
    assert_eq!(yaku_names(&res[0]), vec![Sankantsu]);
    assert_eq!(res[0].2, 2);

    let groups = ["1111m", "2222po", "3333s", "4444po", "77s"];
    let res = calc_yaku_for(&groups, "7s", &ctx);
    assert_eq!(res.len(), 1);
    assert!(res[0].1);
    assert_eq!(yaku_names(&res[0]), vec![Suukantsu]);
    assert_eq!(eval_yaku_for(&groups, "7s", &ctx, Sankantsu), vec![None]);
}

#[test]
fn test_yaku_winds_and_honors() {
    let ctx = Context::default();
    let res = calc_yaku_for(&["EEEw", "SSSw", "WWWw", "NNw", "123m"], "3m", &ctx);
    assert_eq!(res.len(), 1);
    assert!(res[0].1);
    assert_eq!(yaku_names(&res[0]), vec![Shousuushii]);
    assert_eq!(res[0].2, 1);

    // 大四喜は小四喜を含まない
    let res = eval_yaku_for(&["EEEwo", "SSSw", "WWWw", "NNNw", "11m"], "1m", &ctx, Shousuushii);
    assert_eq!(res, vec![None]);

    let res = calc_yaku_for(&["EEEwo", "SSSw", "wwwd", "gggd", "NNw"], "Nw", &ctx);
    assert_eq!(res.len(), 1);
    assert_eq!(yaku_names(&res[0]), vec![Tsuuiisou]);

    // 四暗刻は三暗刻を含まない
    let ctx = Context {
        is_drawn: true,
        ..Default::default()
    };
    let res = eval_yaku_for(&["222m", "444p", "666s", "999s", "Ew"], "Ew", &ctx, Sanankou);
    assert_eq!(res, vec![None]);
}

#[test]
fn test_yaku_houtei_chankan() {
    let mut ctx = Context::default();
    ctx.flags.houteiraoyui = true;
    let res = calc_yaku_for(&["123m", "456m", "789p", "345s", "99s"], "3s", &ctx);
    assert_eq!(yaku_names(&res[0]), vec![Pinfu, Houtei]);

    let mut ctx = Context::default();
    ctx.flags.chankan = true;
    let res = calc_yaku_for(&["123m", "456m", "789p", "345s", "99s"], "3s", &ctx);
    assert_eq!(yaku_names(&res[0]), vec![Pinfu, Chankan]);
    assert_eq!(res[0].2, 2);
}
