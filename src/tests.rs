#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use strum::VariantArray;

    use crate::builder::{BuilderInvalidReason, FaceletCubeBuilder};
    use crate::cluster::{CanonicalColorMap, ColorClusterer, ColorGroup, ColorSample};
    use crate::color::{Hsv, Lab, Rgb};
    use crate::config::SolverConfig;
    use crate::cubie::{CubeState, Move, SOLVED_CUBICLES};
    use crate::error::{ColorParsingError, Error, FaceParsingError, SolutionGenerationError};
    use crate::face::Face;
    use crate::metric::delta_e00;
    use crate::notation::{encode, fold, NotationParser, SliceTurn, Turn};
    use crate::palette::{ColorLabel, ReferencePalette};
    use crate::pocket::{apply_turn, PocketSolver};
    use crate::session::{ScanSession, SolverInput};
    use crate::solver::{Phase, PhasedSolver};

    // "R U F' L(2) D B' R' U(2) F D'" applied to a solved 3x3, faces in scan order
    const SCRAMBLED_3X3: [&str; 6] = ["RRDLUDRLU", "FBBFFRUDL", "LLLFRFUUD", "DUUBLURUR", "BFFBDRBDF", "BDFLBRLBD"];
    const SCRAMBLED_3X3_CUBICLES: &str = "LB DL RD LU FD RU DB BU RF FU LF RB UBL DLB RFD RUF FUL BUR BRD FLD";

    // "R U' F R(2) U F' R' U(2)" applied to a solved 2x2
    const SCRAMBLED_2X2: [&str; 6] = ["ULLL", "BDRD", "FFFR", "RULB", "URDD", "UFBB"];
    const SCRAMBLED_2X2_FACELETS: &str = "LUUUDLFRBBLBUFDRBDFFLDRR";

    const SOLVED_2X2: &str = "UUUULLFFRRBBLLFFRRBBDDDD";

    fn block(face: Face) -> (ColorLabel, Rgb) {
        match face {
            Face::U => (ColorLabel::White, Rgb(235, 235, 235)),
            Face::F => (ColorLabel::Green, Rgb(30, 160, 60)),
            Face::R => (ColorLabel::Red, Rgb(200, 20, 30)),
            Face::L => (ColorLabel::Orange, Rgb(240, 120, 20)),
            Face::D => (ColorLabel::Yellow, Rgb(230, 220, 40)),
            Face::B => (ColorLabel::Blue, Rgb(15, 40, 180)),
        }
    }

    fn scan(faces: &[&str; 6]) -> Vec<Rgb> {
        faces.iter()
            .flat_map(|letters| Face::parse_letters(letters).unwrap())
            .map(|face| block(face).1)
            .collect_vec()
    }

    // deterministic jitter of up to 12 per channel
    fn noisy_scan(faces: &[&str; 6]) -> Vec<Rgb> {
        scan(faces).into_iter()
            .enumerate()
            .map(|(i, rgb)| {
                let jitter = |ch: usize, v: u8| (v as i32 + ((i * 7 + ch * 13) % 25) as i32 - 12).clamp(0, 255) as u8;
                Rgb(jitter(0, rgb.0), jitter(1, rgb.1), jitter(2, rgb.2))
            })
            .collect_vec()
    }

    fn cube_of_letters(faces: &[&str; 6]) -> FaceletCubeBuilder<Face> {
        let size = faces[0].len().isqrt();
        let mut builder = FaceletCubeBuilder::with_size(size);
        for (face, letters) in Face::SCAN_ORDER.iter().zip(faces) {
            builder.paint_face(*face, Face::parse_letters(letters).unwrap());
        }
        builder
    }

    fn pocket_is_solved(facelets: &[Face; 24]) -> bool {
        [[0, 1, 2, 3], [4, 5, 12, 13], [6, 7, 14, 15], [8, 9, 16, 17], [10, 11, 18, 19], [20, 21, 22, 23]]
            .iter()
            .all(|slots| slots.iter().map(|&i| facelets[i]).all_equal())
    }

    fn apply_pocket(facelets: &[Face], turns: &[Turn]) -> [Face; 24] {
        let start: [Face; 24] = facelets.try_into().unwrap();
        turns.iter().fold(start, |state, &turn| apply_turn(&state, turn).unwrap())
    }

    #[test]
    fn hex_codec() {
        let rgb: Rgb = "#1c7ed6".parse().unwrap();
        assert_eq!(rgb, Rgb(0x1c, 0x7e, 0xd6));
        assert_eq!(format!("{}", rgb), "#1c7ed6");
        assert_eq!(format!("{}", Rgb(0, 5, 255)), "#0005ff");

        assert_eq!("#12345".parse::<Rgb>(), Err(ColorParsingError::InvalidHex("#12345".to_string())));
        assert!("zzzzzz".parse::<Rgb>().is_err());
    }

    #[test]
    fn hsv_of_primaries() {
        assert_eq!(Hsv::from(Rgb(255, 0, 0)), Hsv { h: 0.0, s: 1.0, v: 1.0 });
        assert_eq!(Hsv::from(Rgb(0, 0, 0)), Hsv { h: 0.0, s: 0.0, v: 0.0 });

        let green = Hsv::from(Rgb(0, 255, 0));
        assert!((green.h - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn white_under_d65_10() {
        let lab = Rgb(255, 255, 255).to_lab();
        assert!((lab.l - 100.0).abs() < 1e-3);
        assert!((lab.a - 0.4145).abs() < 1e-3);
        assert!((lab.b + 0.9762).abs() < 1e-3);
    }

    #[test]
    fn lab_round_trip_grid() {
        for r in (0..=255).step_by(15) {
            for g in (0..=255).step_by(15) {
                for b in (0..=255).step_by(15) {
                    let rgb = Rgb(r, g, b);
                    let back = rgb.to_lab().to_rgb();
                    assert!(rgb.0.abs_diff(back.0) <= 1 && rgb.1.abs_diff(back.1) <= 1 && rgb.2.abs_diff(back.2) <= 1, "{rgb} became {back}");
                }
            }
        }
    }

    #[test]
    fn delta_e_reference_pair() {
        // first pair of Sharma, Wu and Dalal's test data
        let first = Lab::new(50.0, 2.6772, -79.7751);
        let second = Lab::new(50.0, 0.0, -82.7485);
        assert!((delta_e00(&first, &second) - 2.0425).abs() < 1e-4);
        assert!((delta_e00(&second, &first) - 2.0425).abs() < 1e-4);
        assert_eq!(delta_e00(&first, &first), 0.0);
    }

    #[test]
    fn palette_classification() {
        let palette = ReferencePalette::standard();
        assert_eq!(palette.classify(Rgb(0xfa, 0x52, 0x52)), Some(ColorLabel::Red));
        assert_eq!(palette.classify(Rgb(255, 255, 255)), Some(ColorLabel::White));
        assert_eq!(palette.classify(Rgb(30, 160, 60)), Some(ColorLabel::Green));
        assert_eq!(palette.classify(Rgb(0x19, 0x71, 0xc2)), Some(ColorLabel::Blue));

        let custom = ReferencePalette::from_hex(&[(ColorLabel::Yellow, &["#ffff00"][..]), (ColorLabel::Blue, &["#0000ff"][..])]).unwrap();
        assert_eq!(custom.classify(Rgb(230, 220, 40)), Some(ColorLabel::Yellow));
        assert!(ReferencePalette::from_hex(&[(ColorLabel::Red, &["nope"][..])]).is_err());

        assert_eq!(ReferencePalette::closest_in(Rgb(200, 20, 30), &[Rgb(0, 0, 255), Rgb(255, 0, 0)]), Some(Rgb(255, 0, 0)));
        assert_eq!(ReferencePalette::closest_in(Rgb(200, 20, 30), &[]), None);
    }

    #[test]
    fn sample_count_must_be_six_squares() {
        for count in [0, 6, 30, 53, 60] {
            let colors = vec![Rgb(1, 2, 3); count];
            assert_eq!(ColorClusterer::from_scan(&colors).unwrap_err(), ColorParsingError::SampleCount(count));
        }

        assert!(ColorClusterer::from_scan(&vec![Rgb(1, 2, 3); 24]).is_ok());
        assert!(ColorClusterer::from_scan(&vec![Rgb(1, 2, 3); 96]).is_ok());
        assert!(ColorClusterer::from_scan(&vec![Rgb(1, 2, 3); 6 * 49]).is_ok());
        assert_eq!(ColorClusterer::from_scan(&vec![Rgb(1, 2, 3); 6 * 64]).unwrap_err(), ColorParsingError::SampleCount(384));
    }

    #[test]
    fn samples_tagged_in_scan_order() {
        let samples = ColorSample::from_scan(&scan(&SCRAMBLED_2X2)).unwrap();
        assert_eq!(samples[0], ColorSample { face: Face::U, slot: 0, rgb: block(Face::U).1 });
        assert_eq!(samples[5], ColorSample { face: Face::F, slot: 1, rgb: block(Face::D).1 });
        assert_eq!(samples[23].face, Face::B);
        assert_eq!(samples[23].slot, 3);
    }

    #[test]
    fn cluster_pure_blocks() {
        let clusterer = ColorClusterer::from_scan(&scan(&SCRAMBLED_3X3)).unwrap();
        let groups = clusterer.cluster();

        assert_eq!(groups.len(), 6);
        for group in &groups {
            assert_eq!(group.samples.len(), 9);
            assert!(group.samples.iter().map(|s| s.rgb).all_equal());

            let face = Face::VARIANTS.iter().find(|&&f| block(f).1 == group.samples[0].rgb).unwrap();
            assert_eq!(group.label, block(*face).0);
        }

        let map = clusterer.resolve().unwrap();
        assert_eq!(map.len(), 6);
        assert_eq!(map.get(&Rgb(15, 40, 180)), Some(ColorLabel::Blue));
        assert_eq!(map.get(&Rgb(30, 160, 60)), Some(ColorLabel::Green));
        assert_eq!(map.get(&Rgb(1, 1, 1)), None);
    }

    #[test]
    fn cluster_noisy_samples() {
        let samples = ColorSample::from_scan(&noisy_scan(&SCRAMBLED_3X3)).unwrap();
        let clusterer = ColorClusterer::new(samples).unwrap();

        for group in clusterer.cluster() {
            for sample in &group.samples {
                let letters = SCRAMBLED_3X3[Face::SCAN_ORDER.iter().position(|&f| f == sample.face).unwrap()];
                let truth = Face::try_from(letters.chars().nth(sample.slot).unwrap()).unwrap();
                assert_eq!(group.label, block(truth).0, "{:?}", sample);
            }
        }
    }

    #[test]
    fn ambiguous_identical_samples() {
        let sample = ColorSample { face: Face::U, slot: 0, rgb: Rgb(9, 9, 9) };
        let groups = [
            ColorGroup { label: ColorLabel::White, samples: vec![sample] },
            ColorGroup { label: ColorLabel::Yellow, samples: vec![ColorSample { slot: 1, ..sample }] },
        ];

        assert_eq!(
            CanonicalColorMap::from_groups(&groups),
            Err(ColorParsingError::AmbiguousSample { rgb: Rgb(9, 9, 9), first: ColorLabel::White, second: ColorLabel::Yellow }),
        );
    }

    #[test]
    fn fold_runs() {
        let r = Turn::new(Face::R, 1);
        let u = Turn::new(Face::U, 1);

        assert_eq!(fold([r, u, u.inverse(), r]), vec![Turn::new(Face::R, 2)]);
        assert_eq!(encode([r, r, r]), "R'");
        assert_eq!(encode([r, r, r, r]), "");
        assert_eq!(encode([r, u, u, Turn::new(Face::F, 3)]), "R U(2) F'");
        assert_eq!(encode(Vec::new()), "");
    }

    #[test]
    fn parse_notation() {
        let parser = NotationParser::new(3);
        assert_eq!(parser.max_inset(), 1);
        assert_eq!(
            parser.parse_turns("R U(2) F'").unwrap(),
            vec![Turn::new(Face::R, 1), Turn::new(Face::U, 2), Turn::new(Face::F, 3)],
        );
        assert_eq!(parser.parse("").unwrap(), vec![]);
        assert_eq!(parser.parse("R(5)'").unwrap()[0].as_turn(), Turn::new(Face::R, 3));

        assert_eq!(parser.parse("1R"), Err(FaceParsingError::InvalidInset("1R".to_string())));
        assert_eq!(parser.parse("R X"), Err(FaceParsingError::UnknownFace("X".to_string())));
        assert_eq!(parser.parse("R(x)"), Err(FaceParsingError::InvalidTurnCount("R(x)".to_string())));
        assert_eq!(parser.parse("R2"), Err(FaceParsingError::InvalidTurnCount("R2".to_string())));
        assert_eq!(parser.parse("2"), Err(FaceParsingError::UnknownFace("2".to_string())));

        let big = NotationParser::new(5);
        assert_eq!(big.max_inset(), 2);
        assert_eq!(big.parse("1R'").unwrap(), vec![SliceTurn { face: Face::R, inset: 1, times: 1, inverse: true }]);
        assert_eq!(NotationParser::new(4).max_inset(), 2);
    }

    #[test]
    fn moves_and_inverses() {
        for mv in Move::all() {
            assert_eq!(CubeState::SOLVED.apply(mv).apply(mv.inverse()), CubeState::SOLVED);
            assert_eq!(mv.inverse().inverse(), mv);
        }

        for face in Face::VARIANTS {
            let quarter = Move::new(*face, 1).unwrap();
            let state = CubeState::SOLVED.apply_all([quarter; 4]);
            assert!(state.is_solved());
            assert_eq!(CubeState::SOLVED.apply_all([quarter; 2]), CubeState::SOLVED.apply(Move::new(*face, 2).unwrap()));
        }

        assert_eq!(Move::new(Face::R, 1).unwrap().index(), 15);
        assert_eq!(Move::new(Face::U, 0), None);
        assert_eq!(Move::from_index(18), None);
        assert_eq!(format!("{}", Move::from_index(4).unwrap()), "D(2)");
    }

    #[test]
    fn cubicles_after_r() {
        let state = CubeState::SOLVED.apply(Move::new(Face::R, 1).unwrap());
        assert_eq!(format!("{}", state), "UF FR UB UL DF BR DB DL DR FL UR BL FDR FRU UBL ULF BRD DFL DLB BUR");
        assert_eq!(CubeState::from_cubicles(&state.to_cubicles()).unwrap(), state);
    }

    #[test]
    fn vector_form() {
        let state = CubeState::SOLVED.apply(Move::new(Face::F, 1).unwrap());
        let vector = state.to_vector();
        assert_eq!(&vector[..20], state.perm());
        assert_eq!(&vector[20..], state.orient());
        assert_eq!(CubeState::try_from(vector), Ok(state));
    }

    #[test]
    fn vector_form_rejects_impossible_entries() {
        let solved = CubeState::SOLVED.to_vector();

        // a corner in an edge slot and an edge in a corner slot
        let mut crossed = solved;
        crossed[8] = 12;
        crossed[12] = 8;
        assert_eq!(CubeState::try_from(crossed), Err(SolutionGenerationError::InvalidVector { index: 8, value: 12 }));

        let mut repeated = solved;
        repeated[1] = 0;
        assert_eq!(CubeState::try_from(repeated), Err(SolutionGenerationError::InvalidVector { index: 1, value: 0 }));

        let mut out_of_range = solved;
        out_of_range[19] = 20;
        assert_eq!(CubeState::try_from(out_of_range), Err(SolutionGenerationError::InvalidVector { index: 19, value: 20 }));

        let mut flipped_twice = solved;
        flipped_twice[20] = 2;
        assert_eq!(CubeState::try_from(flipped_twice), Err(SolutionGenerationError::InvalidVector { index: 20, value: 2 }));

        let mut overtwisted = solved;
        overtwisted[39] = 3;
        assert_eq!(CubeState::try_from(overtwisted), Err(SolutionGenerationError::InvalidVector { index: 39, value: 3 }));
    }

    #[test]
    fn solve_state_rejects_unsolvable_states() {
        let mut vector = CubeState::SOLVED.apply(Move::new(Face::R, 1).unwrap()).to_vector();
        vector[32] = (vector[32] + 1) % 3;
        let twisted = CubeState::try_from(vector).unwrap();

        let solver = PhasedSolver::new(SolverConfig::standard());
        assert_eq!(solver.solve_state(&twisted), Err(SolutionGenerationError::CornerOrientation));
        assert_eq!(solver.run_phase(Phase::Tetrads, &twisted), Err(SolutionGenerationError::CornerOrientation));

        let mut vector = CubeState::SOLVED.to_vector();
        vector.swap(0, 1);
        let swapped = CubeState::try_from(vector).unwrap();
        assert_eq!(solver.solve_state(&swapped), Err(SolutionGenerationError::Parity));
    }

    #[test]
    fn prepare_rejects_impossible_cubes() {
        let solver = PhasedSolver::new(SolverConfig::standard());
        let solved = SOLVED_CUBICLES.map(str::to_string);

        let mut twisted = solved.clone();
        twisted[12] = "FRU".to_string();
        assert_eq!(solver.prepare(&twisted), Err(SolutionGenerationError::CornerOrientation));
        assert!(solver.solve(&twisted).is_err());

        // one rotation away from home
        let mut twisted_once = solved.clone();
        twisted_once[12] = "RUF".to_string();
        assert_eq!(CubeState::from_cubicles(&twisted_once).unwrap().orient()[12], 1);
        assert_eq!(solver.prepare(&twisted_once), Err(SolutionGenerationError::CornerOrientation));

        let mut flipped = solved.clone();
        flipped[0] = "FU".to_string();
        assert_eq!(solver.prepare(&flipped), Err(SolutionGenerationError::EdgeOrientation));

        let mut swapped = solved.clone();
        swapped.swap(0, 1);
        assert_eq!(solver.prepare(&swapped), Err(SolutionGenerationError::Parity));

        let mut painted = solved.clone();
        painted[0] = "UU".to_string();
        assert_eq!(solver.prepare(&painted), Err(SolutionGenerationError::OrientationOverflow { slot: 0, label: "UU".to_string() }));

        let mut short = solved.clone();
        short[3] = "U".to_string();
        assert_eq!(solver.prepare(&short), Err(SolutionGenerationError::InvalidCubicle { slot: 3, label: "U".to_string() }));

        assert_eq!(solver.prepare(&solved[..19]), Err(SolutionGenerationError::InputLength { expected: 20, actual: 19 }));

        let trusting = PhasedSolver::new(SolverConfig::standard().with_verify_invariants(false));
        assert_eq!(trusting.prepare(&twisted).unwrap().orient()[12], 2);
    }

    #[test]
    fn phase_keys() {
        let u = CubeState::SOLVED.apply(Move::new(Face::U, 1).unwrap());
        let f = CubeState::SOLVED.apply(Move::new(Face::F, 1).unwrap());

        assert_eq!(Phase::EdgeOrientation.key(&u), Phase::EdgeOrientation.key(&CubeState::SOLVED));
        assert_ne!(Phase::EdgeOrientation.key(&f), Phase::EdgeOrientation.key(&CubeState::SOLVED));
        assert_eq!(Phase::CornerOrientation.key(&u), Phase::CornerOrientation.key(&CubeState::SOLVED));
        assert_ne!(Phase::HalfTurns.key(&u), Phase::HalfTurns.key(&CubeState::SOLVED));

        assert_eq!(Phase::EdgeOrientation.moves().count(), 18);
        assert_eq!(Phase::HalfTurns.moves().map(|mv| mv.quarter_turns()).collect_vec(), vec![2; 6]);
        assert!(!Phase::CornerOrientation.allows(Move::new(Face::F, 1).unwrap()));
        assert!(Phase::CornerOrientation.allows(Move::new(Face::F, 2).unwrap()));
    }

    #[test]
    fn phased_solves_scramble() {
        let solver = PhasedSolver::new(SolverConfig::standard());
        let cubicles = SCRAMBLED_3X3_CUBICLES.split(' ').collect_vec();

        let state = solver.prepare(&cubicles).unwrap();
        let solution = solver.solve(&cubicles).unwrap();
        assert!(!solution.is_empty());
        assert!(state.apply_turns(solution.turns()).is_solved());
    }

    #[test]
    fn phased_solved_and_skipped_phases() {
        let solver = PhasedSolver::new(SolverConfig::standard());
        assert!(solver.solve(&SOLVED_CUBICLES).unwrap().is_empty());

        // U keeps edge and corner orientation, so the first two phases have nothing to do
        let state = CubeState::SOLVED.apply(Move::new(Face::U, 1).unwrap());
        let (moves, next) = solver.run_phase(Phase::EdgeOrientation, &state).unwrap();
        assert!(moves.is_empty());
        assert_eq!(next, state);

        let solution = solver.solve(&state.to_cubicles()).unwrap();
        assert!(state.apply_turns(solution.turns()).is_solved());
    }

    #[test]
    fn pocket_solved_is_empty() {
        let solver = PocketSolver::new(&SolverConfig::standard());
        let solution = solver.solve_letters(SOLVED_2X2).unwrap();
        assert!(solution.is_empty());
        assert_eq!(solution.notation(), "");
    }

    #[test]
    fn pocket_two_moves() {
        // R then U from solved
        let solver = PocketSolver::new(&SolverConfig::standard());
        let solution = solver.solve_letters("UUFFFDRRUBLLLLFDRRUBDBDB").unwrap();
        assert_eq!(solution.notation(), "U' R'");

        let tight = PocketSolver::new(&SolverConfig::standard().with_pocket_rounds(1));
        assert_eq!(
            tight.solve_letters("UUFFFDRRUBLLLLFDRRUBDBDB"),
            Err(Error::Solution(SolutionGenerationError::Unsolved { rounds: 1 })),
        );
    }

    #[test]
    fn pocket_rejects_bad_input() {
        let solver = PocketSolver::new(&SolverConfig::standard());
        assert_eq!(
            solver.solve_letters(&SOLVED_2X2[..23]),
            Err(Error::Solution(SolutionGenerationError::InputLength { expected: 24, actual: 23 })),
        );
        assert_eq!(
            solver.solve_letters("UUUUULFFRRBBLLFFRRBBDDDD"),
            Err(Error::Solution(SolutionGenerationError::FaceletCount { face: Face::U, count: 5 })),
        );
        assert_eq!(solver.solve_letters("UUUUXLFF"), Err(Error::Face(FaceParsingError::UnknownFace("X".to_string()))));
    }

    #[test]
    fn build_cubicles() {
        let cube = cube_of_letters(&SCRAMBLED_3X3).build().unwrap();
        assert_eq!(cube.cubicles().unwrap().join(" "), SCRAMBLED_3X3_CUBICLES);
        assert_eq!(cube.pocket_facelets(), Err(SolutionGenerationError::UnsupportedSize(3)));

        let solved = cube_of_letters(&["UUUUUUUUU", "FFFFFFFFF", "RRRRRRRRR", "LLLLLLLLL", "DDDDDDDDD", "BBBBBBBBB"]).build().unwrap();
        assert_eq!(solved.cubicles().unwrap(), SOLVED_CUBICLES.to_vec());
    }

    #[test]
    fn build_pocket_facelets() {
        let cube = cube_of_letters(&SCRAMBLED_2X2).build().unwrap();
        let facelets = cube.pocket_facelets().unwrap();
        assert_eq!(facelets, Face::parse_letters(SCRAMBLED_2X2_FACELETS).unwrap());

        let solution = PocketSolver::new(&SolverConfig::standard()).solve(&facelets).unwrap();
        assert!(pocket_is_solved(&apply_pocket(&facelets, solution.turns())));
    }

    #[test]
    fn builder_invalid_states() {
        let builder = FaceletCubeBuilder::<Face>::with_size(4);
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::UnsupportedSize(4)]));

        let mut builder = FaceletCubeBuilder::with_size(2);
        builder.paint_face(Face::U, [Face::U; 3]);
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::StickerCount { face: Face::U, count: 3 }]));

        let mut builder = FaceletCubeBuilder::with_size(2);
        builder.paint(Face::D, (2, 0), Face::D);
        assert_eq!(builder.build(), Err(vec![BuilderInvalidReason::StickerOutOfBounds { face: Face::D, row: 2, col: 0 }]));

        let mut builder = cube_of_letters(&SCRAMBLED_2X2);
        builder.paint(Face::B, (1, 1), Face::B);
        assert!(builder.is_valid().is_none());

        let unpainted = FaceletCubeBuilder::<Face>::with_size(2).build().unwrap_err();
        assert_eq!(unpainted.len(), 24);
        assert_eq!(unpainted[0], BuilderInvalidReason::MissingSticker { face: Face::U, row: 0, col: 0 });
    }

    #[test]
    fn duplicate_centers() {
        let cube = cube_of_letters(&["UUUUUUUUU", "UUUUUUUUU", "RRRRRRRRR", "LLLLLLLLL", "DDDDDDDDD", "BBBBBBBBB"]).build().unwrap();
        assert_eq!(cube.cubicles(), Err(SolutionGenerationError::AmbiguousCenters));
    }

    #[test]
    fn session_3x3() {
        let session = ScanSession::new(SolverConfig::standard());
        for colors in [scan(&SCRAMBLED_3X3), noisy_scan(&SCRAMBLED_3X3)] {
            let outcome = session.run(&colors).unwrap();
            assert_eq!(outcome.size, 3);
            assert_eq!(outcome.groups.len(), 6);

            let expected = SCRAMBLED_3X3_CUBICLES.split(' ').map(str::to_string).collect_vec();
            assert_eq!(outcome.input, SolverInput::Cubicles(expected.clone()));

            let state = CubeState::from_cubicles(&expected).unwrap();
            assert!(state.apply_turns(outcome.solution.turns()).is_solved());
        }
    }

    #[test]
    fn session_2x2_from_hex() {
        let hex = scan(&SCRAMBLED_2X2).iter().map(|rgb| rgb.to_string()).collect_vec();
        let outcome = ScanSession::new(SolverConfig::standard()).run_hex(&hex).unwrap();
        assert_eq!(outcome.colors.get(&Rgb(15, 40, 180)), Some(ColorLabel::Blue));

        let SolverInput::Pocket(facelets) = &outcome.input else { panic!("expected pocket input") };
        assert_eq!(*facelets, Face::parse_letters(SCRAMBLED_2X2_FACELETS).unwrap());
        assert!(pocket_is_solved(&apply_pocket(facelets, outcome.solution.turns())));
    }

    #[test]
    fn session_rejects_unsupported_sizes() {
        let session = ScanSession::new(SolverConfig::standard());
        assert_eq!(
            session.run(&vec![Rgb(0, 0, 0); 96]).unwrap_err(),
            Error::Solution(SolutionGenerationError::UnsupportedSize(4)),
        );
        assert_eq!(session.run(&vec![Rgb(0, 0, 0); 10]).unwrap_err(), Error::Color(ColorParsingError::SampleCount(10)));
        assert!(matches!(session.run_hex(&["#zzzzzz"]), Err(Error::Color(ColorParsingError::InvalidHex(_)))));
    }

    #[test]
    fn config_from_env() {
        std::env::set_var("CUBESCAN_POCKET_ROUNDS", "9");
        std::env::set_var("CUBESCAN_VERIFY_INVARIANTS", "false");
        let config = SolverConfig::from_env();
        std::env::remove_var("CUBESCAN_POCKET_ROUNDS");
        std::env::remove_var("CUBESCAN_VERIFY_INVARIANTS");

        assert_eq!(config, SolverConfig { pocket_rounds: 9, verify_invariants: false });
        assert_eq!(SolverConfig::standard(), SolverConfig { pocket_rounds: 6, verify_invariants: true });
    }
}

#[cfg(test)]
mod properties {
    use proptest::prelude::*;
    use strum::VariantArray;

    use crate::cluster::ColorClusterer;
    use crate::color::{Lab, Rgb};
    use crate::config::SolverConfig;
    use crate::cubie::{CubeState, Move};
    use crate::face::Face;
    use crate::metric::delta_e00;
    use crate::notation::{encode, fold, NotationParser, Turn};
    use crate::pocket::{apply_turn, PocketSolver, GENERATORS};
    use crate::solver::PhasedSolver;

    fn lab() -> impl Strategy<Value = Lab> {
        (0.0..100.0f64, -120.0..120.0f64, -120.0..120.0f64).prop_map(|(l, a, b)| Lab::new(l, a, b))
    }

    fn turns(max: usize) -> impl Strategy<Value = Vec<Turn>> {
        prop::collection::vec((0..6usize, 0..4u8), 0..max)
            .prop_map(|raw| raw.into_iter().map(|(f, q)| Turn::new(Face::VARIANTS[f], q)).collect())
    }

    proptest! {
        #[test]
        fn lab_round_trip(r: u8, g: u8, b: u8) {
            let back = Rgb(r, g, b).to_lab().to_rgb();
            prop_assert!(r.abs_diff(back.0) <= 1 && g.abs_diff(back.1) <= 1 && b.abs_diff(back.2) <= 1);
        }

        #[test]
        fn delta_e_symmetric(x in lab(), y in lab()) {
            prop_assert!((delta_e00(&x, &y) - delta_e00(&y, &x)).abs() < 1e-9);
            prop_assert!(delta_e00(&x, &y) >= 0.0);
            prop_assert_eq!(delta_e00(&x, &x), 0.0);
        }

        #[test]
        fn fold_idempotent(raw in turns(40)) {
            let once = encode(raw.clone());
            let again = encode(NotationParser::new(3).parse_turns(&once).unwrap());
            prop_assert_eq!(&once, &again);

            let folded = fold(raw.clone());
            prop_assert!(folded.windows(2).all(|pair| pair[0].face != pair[1].face));
            prop_assert_eq!(CubeState::SOLVED.apply_turns(&raw), CubeState::SOLVED.apply_turns(&folded));
        }

        #[test]
        fn clusters_partition(colors in prop::collection::vec(any::<(u8, u8, u8)>(), 24)) {
            let colors: Vec<Rgb> = colors.into_iter().map(|(r, g, b)| Rgb(r, g, b)).collect();
            let clusterer = ColorClusterer::from_scan(&colors).unwrap();

            let groups = clusterer.group_indices();
            prop_assert_eq!(groups.len(), 6);
            prop_assert!(groups.iter().all(|group| group.len() == 4));

            let mut seen: Vec<usize> = groups.into_iter().flatten().collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..24).collect::<Vec<_>>());
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn phased_solution_solves(scramble in prop::collection::vec(0..Move::COUNT, 0..25)) {
            let state = CubeState::SOLVED.apply_all(scramble.into_iter().filter_map(Move::from_index));
            prop_assert!(state.verify().is_ok());

            let solution = PhasedSolver::new(SolverConfig::standard()).solve(&state.to_cubicles()).unwrap();
            prop_assert!(state.apply_turns(solution.turns()).is_solved());
        }

        #[test]
        fn pocket_solution_solves(scramble in prop::collection::vec((0..3usize, 1..4u8), 0..12)) {
            let solved: [Face; 24] = Face::parse_letters("UUUULLFFRRBBLLFFRRBBDDDD").unwrap().try_into().unwrap();
            let scrambled = scramble.iter()
                .fold(solved, |state, &(g, q)| apply_turn(&state, Turn::new(GENERATORS[g], q)).unwrap());

            let solution = PocketSolver::new(&SolverConfig::standard()).solve(&scrambled).unwrap();
            let result = solution.turns().iter().fold(scrambled, |state, &turn| apply_turn(&state, turn).unwrap());
            prop_assert_eq!(result, solved);
        }
    }
}
