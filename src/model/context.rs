use super::*;

// 特殊条件の役
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WinFlags {
    pub dabururiichi: bool,
    pub ippatsu: bool,
    pub haiteiraoyue: bool,
    pub houteiraoyui: bool,
    pub rinshankaihou: bool,
    pub chankan: bool,
}

// 和了時の状況 (評価中は不変)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Context {
    pub seat_wind: Tnum,      // 自風 (東: 1, 南: 2, 西: 3, 北: 4)
    pub prevalent_wind: Tnum, // 場風 (同上)
    pub is_drawn: bool,       // ツモ和了
    pub riichi: bool,         // リーチ
    pub doras: Vec<Tile>,     // ドラ (注:ドラ表示牌ではない)
    pub honba: usize,         // 本場
    pub flags: WinFlags,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            seat_wind: WE,
            prevalent_wind: WE,
            is_drawn: false,
            riichi: false,
            doras: vec![],
            honba: 0,
            flags: WinFlags::default(),
        }
    }
}

impl Context {
    #[inline]
    pub fn is_dealer(&self) -> bool {
        self.seat_wind == WE
    }

    #[inline]
    pub fn is_riichi(&self) -> bool {
        self.riichi || self.flags.dabururiichi
    }

    // フラグの組み合わせの整合性チェック
    pub fn validate(&self, has_kan: bool) -> HandResult<()> {
        for w in [self.seat_wind, self.prevalent_wind] {
            if !(WE..=WN).contains(&w) {
                return Err(HandError::InvalidWind(w));
            }
        }

        let f = &self.flags;
        if self.riichi && f.dabururiichi {
            return Err(HandError::DuplicateRiichi);
        }
        if f.ippatsu && !self.is_riichi() {
            return Err(HandError::IppatsuWithoutRiichi);
        }
        if f.chankan && self.is_drawn {
            return Err(HandError::ChankanTsumo);
        }
        if f.rinshankaihou && !self.is_drawn {
            return Err(HandError::RinshanWithoutTsumo);
        }
        if f.rinshankaihou && !has_kan {
            return Err(HandError::RinshanWithoutKan);
        }
        if f.rinshankaihou && f.ippatsu {
            // 自分の槓で一発は消える
            return Err(HandError::RinshanIppatsu);
        }
        if f.dabururiichi && f.ippatsu && f.haiteiraoyue {
            return Err(HandError::DoubleRiichiHaiteiIppatsu);
        }
        if f.haiteiraoyue && !self.is_drawn {
            return Err(HandError::HaiteiRon);
        }
        if f.houteiraoyui && self.is_drawn {
            return Err(HandError::HouteiTsumo);
        }
        Ok(())
    }
}

#[test]
fn test_validate_flags() {
    let mut ctx = Context::default();
    assert_eq!(ctx.validate(false), Ok(()));

    ctx.flags.ippatsu = true;
    assert_eq!(ctx.validate(false), Err(HandError::IppatsuWithoutRiichi));
    ctx.flags.dabururiichi = true;
    assert_eq!(ctx.validate(false), Ok(()));
    ctx.riichi = true;
    assert_eq!(ctx.validate(false), Err(HandError::DuplicateRiichi));

    let mut ctx = Context {
        is_drawn: true,
        ..Default::default()
    };
    ctx.flags.rinshankaihou = true;
    assert_eq!(ctx.validate(false), Err(HandError::RinshanWithoutKan));
    assert_eq!(ctx.validate(true), Ok(()));
    ctx.flags.chankan = true;
    assert_eq!(ctx.validate(true), Err(HandError::ChankanTsumo));

    // 嶺上開花と一発は複合しない
    let mut ctx = Context {
        is_drawn: true,
        riichi: true,
        ..Default::default()
    };
    ctx.flags.rinshankaihou = true;
    ctx.flags.ippatsu = true;
    assert_eq!(ctx.validate(true), Err(HandError::RinshanIppatsu));

    let mut ctx = Context {
        is_drawn: true,
        ..Default::default()
    };
    ctx.flags.dabururiichi = true;
    ctx.flags.ippatsu = true;
    assert_eq!(ctx.validate(false), Ok(()));
    ctx.flags.haiteiraoyue = true;
    assert_eq!(ctx.validate(false), Err(HandError::DoubleRiichiHaiteiIppatsu));
    ctx.flags.ippatsu = false;
    assert_eq!(ctx.validate(false), Ok(()));
}

#[test]
fn test_validate_winds() {
    let ctx = Context {
        seat_wind: WN,
        prevalent_wind: WS,
        ..Default::default()
    };
    assert_eq!(ctx.validate(false), Ok(()));

    let ctx = Context {
        seat_wind: 10,
        ..Default::default()
    };
    assert_eq!(ctx.validate(false), Err(HandError::InvalidWind(10)));
    let ctx = Context {
        prevalent_wind: DW,
        ..Default::default()
    };
    assert_eq!(ctx.validate(false), Err(HandError::InvalidWind(DW)));
}
