// Unit tests for the anchor codec

#[cfg(test)]
mod tests {
    use crate::domain::codec::*;
    use crate::domain::errors::*;
    use crate::domain::model::*;

    const BASE_METADATA: &str = ";FFMETADATA1
major_brand=brand
minor_version=1
compatible_brands=compatible
encoder=Lavf58.76.100";

    const TWO_PERIOD_METADATA: &str = ";FFMETADATA1
major_brand=brand
minor_version=1
compatible_brands=compatible
encoder=Lavf58.76.100

[CHAPTER]
TIMEBASE=1/1000
START=10000
END=10001
title=Period 1, 0.0

[CHAPTER]
TIMEBASE=1/1000
START=1000000
END=1000001
title=Period 2, 0.0";

    fn anchor(period: u32, clock: f64, video_time: f64) -> Anchor {
        Anchor::new(period, clock, video_time).unwrap()
    }

    #[test]
    fn test_write_no_anchors_keeps_metadata() {
        assert_eq!(AnchorCodec::write(&[], BASE_METADATA), BASE_METADATA);
    }

    #[test]
    fn test_write_two_periods() {
        let anchors = [anchor(1, 0.0, 10.0), anchor(2, 0.0, 1000.0)];
        assert_eq!(
            AnchorCodec::write(&anchors, BASE_METADATA),
            TWO_PERIOD_METADATA
        );
    }

    #[test]
    fn test_write_replaces_existing_chapters() {
        let anchors = [anchor(3, 10.0, 30.0)];

        let expected = format!(
            "{}\n\n[CHAPTER]\nTIMEBASE=1/1000\nSTART=30000\nEND=30001\ntitle=Period 3, 10.0",
            BASE_METADATA
        );
        assert_eq!(AnchorCodec::write(&anchors, TWO_PERIOD_METADATA), expected);
    }

    #[test]
    fn test_write_keeps_input_order() {
        let anchors = [
            anchor(2, 0.0, 3000.0),
            anchor(1, 1000.0, 2000.0),
            anchor(1, 0.0, 100.0),
        ];
        let metadata = AnchorCodec::write(&anchors, BASE_METADATA);

        let titles: Vec<&str> = metadata
            .lines()
            .filter_map(|line| line.strip_prefix("title="))
            .collect();
        assert_eq!(
            titles,
            vec!["Period 2, 0.0", "Period 1, 1000.0", "Period 1, 0.0"]
        );
        assert_eq!(metadata.matches(CHAPTER_MARKER).count(), 3);
    }

    #[test]
    fn test_write_rounds_to_milliseconds() {
        let metadata = AnchorCodec::write(&[anchor(1, 0.0, 12.3456)], "");
        assert!(metadata.contains("START=12346\nEND=12347"));
    }

    #[test]
    fn test_write_end_is_one_millisecond_after_start() {
        let anchors = [anchor(1, 0.0, 0.0), anchor(2, 12.5, 2710.25)];
        let metadata = AnchorCodec::write(&anchors, BASE_METADATA);
        let starts: Vec<u64> = metadata
            .lines()
            .filter_map(|line| line.strip_prefix("START="))
            .map(|v| v.parse().unwrap())
            .collect();
        let ends: Vec<u64> = metadata
            .lines()
            .filter_map(|line| line.strip_prefix("END="))
            .map(|v| v.parse().unwrap())
            .collect();
        assert_eq!(starts, vec![0, 2710250]);
        assert_eq!(ends, vec![1, 2710251]);
    }

    #[test]
    fn test_write_is_deterministic() {
        let anchors = [anchor(1, 0.0, 10.0), anchor(1, 600.5, 700.0)];
        assert_eq!(
            AnchorCodec::write(&anchors, BASE_METADATA),
            AnchorCodec::write(&anchors, BASE_METADATA)
        );
    }

    #[test]
    fn test_format_title() {
        assert_eq!(AnchorCodec::format_title(&anchor(1, 0.0, 0.0)), "Period 1, 0.0");
        assert_eq!(
            AnchorCodec::format_title(&anchor(2, 10.25, 0.0)),
            "Period 2, 10.25"
        );
    }

    #[test]
    fn test_parse_title() {
        assert_eq!(AnchorCodec::parse_title("Period 1, 0.0").unwrap(), (1, 0.0));
        assert_eq!(AnchorCodec::parse_title("Period 4, 12.5").unwrap(), (4, 12.5));
        assert_eq!(AnchorCodec::parse_title("Period 2, 10").unwrap(), (2, 10.0));
    }

    #[test]
    fn test_parse_title_malformed() {
        for title in [
            "",
            "Chapter 1",
            "Period 1",
            "Period x, 0.0",
            "Period 1, abc",
            "Half 1, 0.0",
            "Period 1, 0.0, 3",
        ] {
            assert_eq!(
                AnchorCodec::parse_title(title),
                Err(DomainError::MalformedAnchorTitle {
                    title: title.to_string()
                }),
                "title {:?}",
                title
            );
        }
    }

    #[test]
    fn test_read_records() {
        let records = vec![
            ChapterRecord::new(0.0, "Period 1, 0.0"),
            ChapterRecord::new(1100.0, "Period 2, 10.0"),
            ChapterRecord::new(5000.0, "Period 3, 0.0"),
            ChapterRecord::new(5200.0, "Period 4, 0.0"),
        ];

        let anchors = AnchorCodec::read(&records).unwrap();
        assert_eq!(
            anchors,
            vec![
                anchor(1, 0.0, 0.0),
                anchor(2, 10.0, 1100.0),
                anchor(3, 0.0, 5000.0),
                anchor(4, 0.0, 5200.0),
            ]
        );
    }

    #[test]
    fn test_read_empty() {
        assert!(AnchorCodec::read(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_read_malformed_title() {
        let records = vec![
            ChapterRecord::new(0.0, "Period 1, 0.0"),
            ChapterRecord::new(10.0, "Intro"),
        ];
        assert!(matches!(
            AnchorCodec::read(&records),
            Err(DomainError::MalformedAnchorTitle { .. })
        ));
    }

    #[test]
    fn test_strip_chapters() {
        assert_eq!(AnchorCodec::strip_chapters(TWO_PERIOD_METADATA), BASE_METADATA);
        assert_eq!(AnchorCodec::strip_chapters(BASE_METADATA), BASE_METADATA);
    }

    #[test]
    fn test_chapters_from_metadata() {
        let chapters = AnchorCodec::chapters_from_metadata(TWO_PERIOD_METADATA).unwrap();
        assert_eq!(
            chapters,
            vec![
                ChapterRecord::new(10.0, "Period 1, 0.0"),
                ChapterRecord::new(1000.0, "Period 2, 0.0"),
            ]
        );
        assert!(AnchorCodec::chapters_from_metadata(BASE_METADATA)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_chapters_from_metadata_other_timebase_and_escapes() {
        let metadata = ";FFMETADATA1\n[CHAPTER]\nTIMEBASE=1/90000\nSTART=180000\nEND=270000\ntitle=Kick\\=off\n[STREAM]\ntitle=ignored\n";
        let chapters = AnchorCodec::chapters_from_metadata(metadata).unwrap();
        assert_eq!(chapters, vec![ChapterRecord::new(2.0, "Kick=off")]);
    }

    #[test]
    fn test_chapters_from_metadata_missing_start() {
        let metadata = ";FFMETADATA1\n[CHAPTER]\nTIMEBASE=1/1000\ntitle=Period 1, 0.0\n";
        assert!(matches!(
            AnchorCodec::chapters_from_metadata(metadata),
            Err(DomainError::MalformedMetadata(_))
        ));
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let anchors = vec![
            anchor(1, 0.0, 35.0),
            anchor(1, 1000.0, 2000.5),
            anchor(2, 0.0, 3600.0),
            anchor(2, 12.75, 4000.125),
        ];
        let metadata = AnchorCodec::write(&anchors, BASE_METADATA);
        let records = AnchorCodec::chapters_from_metadata(&metadata).unwrap();
        assert_eq!(AnchorCodec::read(&records).unwrap(), anchors);
    }

    #[test]
    fn test_write_largest_timestamps() {
        let metadata = AnchorCodec::write(&[anchor(1, 0.0, 9e15)], BASE_METADATA);
        assert!(metadata.ends_with(
            "START=9000000000000000000\nEND=9000000000000000001\ntitle=Period 1, 0.0"
        ));
    }

    #[test]
    fn test_video_time_beyond_timestamp_range() {
        assert!(matches!(
            Anchor::new(1, 0.0, 1e17),
            Err(DomainError::InvalidAnchor(_))
        ));
        assert!(matches!(
            AnchorCodec::read(&[ChapterRecord::new(1e17, "Period 1, 0.0")]),
            Err(DomainError::InvalidAnchor(_))
        ));
    }
}
